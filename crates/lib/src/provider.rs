//! The set of locally configured cloud compute providers.

use std::collections::BTreeSet;

/// Ids of the compute providers this installation can launch VMs at.
///
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRegistry {
  ids: BTreeSet<String>,
}

impl ProviderRegistry {
  /// Build a registry from provider ids. Blank ids are ignored.
  pub fn new<I, S>(ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let ids = ids
      .into_iter()
      .map(Into::into)
      .map(|id: String| id.trim().to_string())
      .filter(|id| !id.is_empty())
      .collect();
    Self { ids }
  }

  pub fn ids(&self) -> &BTreeSet<String> {
    &self.ids
  }

  pub fn contains(&self, id: &str) -> bool {
    self.ids.contains(id)
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }
}

impl<S: Into<String>> FromIterator<S> for ProviderRegistry {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self::new(iter)
  }
}
