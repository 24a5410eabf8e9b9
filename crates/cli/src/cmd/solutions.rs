use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use vlab_lib::Config;

use crate::output::{OutputFormat, format_elapsed, print_entry, print_field, print_info, print_json};

#[derive(Serialize)]
struct SolutionItem<'a> {
  name: &'a str,
  url: &'a str,
  toolbox: &'a str,
  description: &'a str,
}

pub fn cmd_solutions(config: &Config, problem: Option<&str>, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let (pipeline, rt) = super::pipeline(config)?;

  if pipeline.registry().is_empty() {
    tracing::warn!("no providers configured, no solution can be usable");
  }

  let solutions = rt.block_on(pipeline.list_usable_solutions(problem))?;

  if output.is_json() {
    let items: Vec<_> = solutions
      .iter()
      .map(|s| SolutionItem {
        name: &s.name,
        url: &s.url,
        toolbox: s.toolbox.url(),
        description: &s.description,
      })
      .collect();
    print_json(&items)?;
    return Ok(());
  }

  if solutions.is_empty() {
    print_info("No usable solutions found");
    return Ok(());
  }

  for solution in &solutions {
    print_entry(&solution.name, &solution.url);
  }
  println!();
  print_field("Usable solutions", &solutions.len().to_string());
  print_field("Duration", &format_elapsed(start.elapsed()));

  Ok(())
}
