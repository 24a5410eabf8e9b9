//! Built-in recipe templates.

/// Puppet module template used when no custom template is configured.
///
/// Bindings: `sc_name`, `source.{type,url,checkout,exec}`, `system_packages`,
/// `python_packages`, `python_requirements`.
pub const PUPPET_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/recipe.pp.hbs"));
