//! vlab-lib: the solution-to-recipe pipeline of the Virtual Laboratory portal
//!
//! This crate turns entries of the Scientific Code Marketplace (SCM) catalogue
//! into something a scientist can launch:
//! - `scm`: catalogue client and the solution, toolbox and problem types
//! - `filter`: keeps solutions that have an image at a configured provider
//! - `recipe`: merges dependencies and renders the provisioning recipe
//! - `snapshot` and `job`: the pipeline's view of portal storage
//! - `pipeline`: the facade tying these together

pub mod config;
pub mod consts;
pub mod filter;
pub mod job;
pub mod pipeline;
pub mod platform;
pub mod provider;
pub mod recipe;
pub mod scm;
pub mod snapshot;
pub mod util;

pub use config::{Config, ConfigError};
pub use pipeline::{JobImages, Pipeline, PipelineError};
pub use provider::ProviderRegistry;
