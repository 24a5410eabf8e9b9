mod attach;
mod images;
mod info;
mod problems;
mod recipe;
mod snapshot;
mod solutions;

pub use attach::cmd_attach;
pub use images::{cmd_images, cmd_providers};
pub use info::cmd_info;
pub use problems::cmd_problems;
pub use recipe::cmd_recipe;
pub use snapshot::{SnapshotCommand, cmd_snapshot};
pub use solutions::cmd_solutions;

use anyhow::{Context, Result};
use vlab_lib::{Config, Pipeline};

/// Build the pipeline and the runtime to drive it.
fn pipeline(config: &Config) -> Result<(Pipeline, tokio::runtime::Runtime)> {
  let pipeline = Pipeline::from_config(config).context("Failed to set up pipeline")?;
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  Ok((pipeline, rt))
}
