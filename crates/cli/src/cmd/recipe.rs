//! Implementation of the `vl recipe` command.
//!
//! Renders the provisioning recipe of a solution. The recipe is written only
//! once it has been rendered in full.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use vlab_lib::Config;

use crate::output::print_success;

pub fn cmd_recipe(config: &Config, solution: &str, out: Option<&Path>) -> Result<()> {
  let (pipeline, rt) = super::pipeline(config)?;
  let recipe = rt
    .block_on(pipeline.build_recipe(solution))
    .with_context(|| format!("Failed to build recipe for {}", solution))?;

  match out {
    Some(path) => {
      std::fs::write(path, &recipe).with_context(|| format!("Failed to write {}", path.display()))?;
      info!(path = %path.display(), "recipe written");
      print_success(&format!("Recipe written to {}", path.display()));
    }
    None => print!("{}", recipe),
  }

  Ok(())
}
