use anyhow::Result;
use serde::Serialize;

use vlab_lib::Config;
use vlab_lib::platform::paths::config_file;

use crate::output::{OutputFormat, print_json, print_field};

#[derive(Serialize)]
struct InfoOutput<'a> {
  version: &'a str,
  config_file: String,
  #[serde(flatten)]
  config: &'a Config,
  snapshots_file: String,
  jobs_file: String,
}

pub fn cmd_info(config: &Config, output: OutputFormat) -> Result<()> {
  let snapshots = config.snapshots_file();
  let jobs = config.jobs_file();

  if output.is_json() {
    return print_json(&InfoOutput {
      version: env!("CARGO_PKG_VERSION"),
      config_file: config_file().display().to_string(),
      config,
      snapshots_file: snapshots.display().to_string(),
      jobs_file: jobs.display().to_string(),
    });
  }

  let timeouts = config.timeouts();
  let providers = if config.providers.is_empty() {
    "(none)".to_string()
  } else {
    config.providers.join(", ")
  };
  let template = config
    .template
    .as_ref()
    .map(|p| p.display().to_string())
    .unwrap_or_else(|| "(built-in)".to_string());

  println!("vl v{}", env!("CARGO_PKG_VERSION"));
  println!();
  print_field("Catalogue", &config.scm_url);
  print_field("Providers", &providers);
  print_field("Connect timeout", &humantime::format_duration(timeouts.connect).to_string());
  print_field("Read timeout", &humantime::format_duration(timeouts.read).to_string());
  print_field("Template", &template);
  print_field("Snapshots", &snapshots.display().to_string());
  print_field("Jobs", &jobs.display().to_string());
  print_field("Config file", &config_file().display().to_string());

  Ok(())
}
