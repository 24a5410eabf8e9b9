//! Provisioning recipes.
//!
//! A recipe is built in two steps:
//! 1. [`merge`] combines toolbox and solution dependencies into a [`Manifest`]
//! 2. [`RecipeRenderer`] renders the manifest through a template into the
//!    text of a provisioning module (a Puppet class by default)

mod manifest;
mod render;
mod templates;

pub use manifest::{Manifest, merge};
pub use render::{RecipeError, RecipeRenderer, safe_name};
pub use templates::PUPPET_TEMPLATE;
