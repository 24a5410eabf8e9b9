use anyhow::Result;

use vlab_lib::Config;

use crate::output::print_success;

pub fn cmd_attach(config: &Config, job_id: i64, solution: &str) -> Result<()> {
  let (pipeline, _rt) = super::pipeline(config)?;
  pipeline.attach_solution_to_job(job_id, solution)?;

  print_success(&format!("Attached {} to job {}", solution, job_id));
  Ok(())
}
