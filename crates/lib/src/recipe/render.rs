//! Recipe rendering.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::{Handlebars, RenderError, TemplateError, handlebars_helper};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::manifest::Manifest;
use super::templates::PUPPET_TEMPLATE;

/// Name the recipe template is registered under.
const TEMPLATE_NAME: &str = "recipe";

/// Errors that can occur while rendering a recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
  /// The toolbox name has no identifier characters left after normalization.
  #[error("toolbox name reduces to an empty identifier")]
  InvalidName,

  #[error("failed to read recipe template {}: {source}", path.display())]
  ReadTemplate {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid recipe template: {0}")]
  Template(#[source] Box<TemplateError>),

  #[error("failed to render recipe: {0}")]
  Render(#[source] Box<RenderError>),
}

handlebars_helper!(lower: |s: str| s.to_lowercase());

// Order-preserving dedup, so a package listed twice is declared once.
handlebars_helper!(unique: |items: array| {
  let mut seen: Vec<&Value> = Vec::new();
  items
    .iter()
    .filter(|item| {
      if seen.contains(item) {
        return false;
      }
      seen.push(*item);
      true
    })
    .cloned()
    .collect::<Vec<Value>>()
});

/// Renders [`Manifest`]s through a handlebars template.
///
/// Strict mode is on, so a template referencing a binding that does not exist
/// fails to render instead of producing an empty string. Output is not
/// HTML-escaped.
///
/// Templates can use two helpers besides the built-ins: `lower` lowercases a
/// string and `unique` drops repeated entries from a list.
#[derive(Debug)]
pub struct RecipeRenderer {
  registry: Handlebars<'static>,
}

impl RecipeRenderer {
  /// Renderer for the built-in Puppet module template.
  pub fn new() -> Result<Self, RecipeError> {
    Self::with_template(PUPPET_TEMPLATE)
  }

  /// Renderer for a template given as text.
  pub fn with_template(template: &str) -> Result<Self, RecipeError> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.set_strict_mode(true);
    registry.register_helper("lower", Box::new(lower));
    registry.register_helper("unique", Box::new(unique));
    registry
      .register_template_string(TEMPLATE_NAME, template)
      .map_err(|e| RecipeError::Template(Box::new(e)))?;
    Ok(Self { registry })
  }

  /// Renderer for a template read from `path`.
  pub fn from_file(path: &Path) -> Result<Self, RecipeError> {
    debug!(path = %path.display(), "loading recipe template");
    let template = fs::read_to_string(path).map_err(|source| RecipeError::ReadTemplate {
      path: path.to_path_buf(),
      source,
    })?;
    Self::with_template(&template)
  }

  /// Render `manifest` into recipe text.
  pub fn render(&self, manifest: &Manifest) -> Result<String, RecipeError> {
    if manifest.sc_name.is_empty() {
      return Err(RecipeError::InvalidName);
    }

    self
      .registry
      .render(TEMPLATE_NAME, manifest)
      .map_err(|e| RecipeError::Render(Box::new(e)))
  }
}

/// Reduce `raw` to an identifier by dropping every character outside `[A-Za-z0-9_]`.
///
/// The result is used for Puppet class names and install paths.
pub fn safe_name(raw: &str) -> String {
  raw.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect()
}
