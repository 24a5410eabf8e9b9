use anyhow::Result;

use vlab_lib::Config;

use crate::output::{OutputFormat, print_entry, print_info, print_json};

pub fn cmd_problems(config: &Config, output: OutputFormat) -> Result<()> {
  let (pipeline, rt) = super::pipeline(config)?;
  let problems = rt.block_on(pipeline.list_problems())?;

  if output.is_json() {
    return print_json(&problems);
  }

  if problems.is_empty() {
    print_info("No problems found");
    return Ok(());
  }

  for problem in &problems {
    print_entry(&problem.id, &problem.name);
  }

  Ok(())
}
