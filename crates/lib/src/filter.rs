//! Selection of the solutions this installation can actually run.
//!
//! A solution is useful when its toolbox has at least one image at a
//! configured provider. Toolboxes are resolved one solution at a time; a
//! solution whose toolbox cannot be resolved is skipped, never fatal.

use tracing::{debug, warn};

use crate::provider::ProviderRegistry;
use crate::scm::{CatalogueClient, Solution, Toolbox};

/// Filter `solutions` down to the useful ones.
///
/// The result keeps input order and holds each solution at most once.
pub async fn useful_solutions(
  client: &CatalogueClient,
  registry: &ProviderRegistry,
  solutions: Vec<Solution>,
) -> Vec<Solution> {
  let mut useful: Vec<Solution> = Vec::new();

  for solution in solutions {
    if useful.iter().any(|kept| same_entry(kept, &solution)) {
      debug!(solution = %solution.url, "skipping duplicate solution");
      continue;
    }

    let toolbox = match solution.toolbox(client, true).await {
      Ok(toolbox) => toolbox,
      Err(e) => {
        warn!(solution = %solution.url, error = %e, "skipping solution with unresolvable toolbox");
        continue;
      }
    };

    if has_usable_image(&toolbox, registry) {
      useful.push(solution);
    } else {
      debug!(solution = %solution.url, toolbox = %toolbox.url, "no image at a configured provider");
    }
  }

  useful
}

/// Whether `toolbox` has an image at any provider in `registry`.
pub fn has_usable_image(toolbox: &Toolbox, registry: &ProviderRegistry) -> bool {
  toolbox.images.iter().any(|image| registry.contains(&image.provider))
}

/// Solutions are identified by URL; anonymous ones only by full equality.
fn same_entry(a: &Solution, b: &Solution) -> bool {
  if a.url.is_empty() || b.url.is_empty() {
    a == b
  } else {
    a.url == b.url
  }
}
