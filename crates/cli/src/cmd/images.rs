use anyhow::Result;

use vlab_lib::Config;

use crate::output::{OutputFormat, print_images, print_info, print_json};

pub fn cmd_images(config: &Config, job_id: i64, output: OutputFormat) -> Result<()> {
  let (pipeline, rt) = super::pipeline(config)?;
  let images = rt.block_on(pipeline.images_for_job(Some(job_id)))?.unwrap_or_default();

  if output.is_json() {
    return print_json(&images);
  }

  if images.is_empty() {
    print_info(&format!("No images available for job {}", job_id));
    return Ok(());
  }

  for (provider, ids) in &images {
    print_images(provider, ids);
  }

  Ok(())
}

pub fn cmd_providers(config: &Config, job_id: i64, output: OutputFormat) -> Result<()> {
  let (pipeline, rt) = super::pipeline(config)?;
  let providers = rt.block_on(pipeline.providers_for_job(Some(job_id)))?.unwrap_or_default();

  if output.is_json() {
    return print_json(&providers);
  }

  if providers.is_empty() {
    print_info(&format!("No providers available for job {}", job_id));
    return Ok(());
  }

  for provider in &providers {
    println!("{}", provider);
  }

  Ok(())
}
