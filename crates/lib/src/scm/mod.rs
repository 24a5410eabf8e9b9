//! Scientific Code Marketplace (SCM) catalogue access.
//!
//! - [`CatalogueClient`] fetches and decodes solutions, toolboxes and problems
//! - [`Solution`], [`Toolbox`], [`Dependency`] and [`Image`] model the catalogue entries

pub mod client;
pub mod types;

pub use client::{CatalogueClient, CatalogueError, Timeouts};
pub use types::{Dependency, Image, Problem, Solution, Source, Toolbox, ToolboxRef};
