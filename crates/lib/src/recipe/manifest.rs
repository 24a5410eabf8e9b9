//! Dependency merging.

use serde::Serialize;
use tracing::warn;

use crate::scm::{Dependency, Solution, Source, Toolbox};

use super::render::safe_name;

/// The merged, normalized package description of a toolbox + solution pair.
///
/// Field names double as the template bindings. Lists keep toolbox entries
/// first, then solution entries, each in catalogue order; nothing is
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
  /// Identifier-safe toolbox name. May be empty; rendering rejects that.
  pub sc_name: String,
  pub source: Source,
  pub system_packages: Vec<String>,
  pub python_packages: Vec<String>,
  pub python_requirements: Vec<String>,
}

impl Manifest {
  fn add(&mut self, dep: &Dependency) {
    match dep {
      Dependency::System { name } => self.system_packages.push(name.clone()),
      Dependency::PythonNamed { name } => self.python_packages.push(name.clone()),
      Dependency::PythonRequirements { path } => self.python_requirements.push(path.clone()),
      Dependency::Unknown { raw } => {
        warn!(kind = dep.kind().unwrap_or("<none>"), dependency = ?raw, "skipping dependency of unknown type");
      }
    }
  }
}

/// Merge `toolbox` and `solution` dependencies into a [`Manifest`].
pub fn merge(toolbox: &Toolbox, solution: &Solution) -> Manifest {
  let mut manifest = Manifest {
    sc_name: safe_name(&toolbox.name),
    source: toolbox.source.clone(),
    ..Manifest::default()
  };

  for dep in toolbox.dependencies.iter().chain(&solution.dependencies) {
    manifest.add(dep);
  }

  manifest
}
