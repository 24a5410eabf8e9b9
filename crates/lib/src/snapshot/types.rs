use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current version of the on-disk snapshot table format.
pub const SNAPSHOT_TABLE_VERSION: u32 = 1;

/// A VM image built for a catalogue entry at a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  pub entry_id: String,
  pub provider_id: String,
  pub vm_id: String,
}

impl Snapshot {
  pub fn new(entry_id: impl Into<String>, provider_id: impl Into<String>, vm_id: impl Into<String>) -> Self {
    Self {
      entry_id: entry_id.into(),
      provider_id: provider_id.into(),
      vm_id: vm_id.into(),
    }
  }
}

/// All snapshots, at most one per `(entry_id, provider_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTable {
  pub version: u32,
  pub snapshots: Vec<Snapshot>,
}

impl Default for SnapshotTable {
  fn default() -> Self {
    Self::new()
  }
}

impl SnapshotTable {
  pub fn new() -> Self {
    Self {
      version: SNAPSHOT_TABLE_VERSION,
      snapshots: Vec::new(),
    }
  }

  /// Find the snapshot for an entry at a provider.
  pub fn find(&self, entry_id: &str, provider_id: &str) -> Option<&Snapshot> {
    self
      .snapshots
      .iter()
      .find(|s| s.entry_id == entry_id && s.provider_id == provider_id)
  }

  /// Insert `snapshot`, replacing any existing one for the same pair.
  ///
  /// Returns the replaced VM id.
  pub fn upsert(&mut self, snapshot: Snapshot) -> Option<String> {
    match self
      .snapshots
      .iter_mut()
      .find(|s| s.entry_id == snapshot.entry_id && s.provider_id == snapshot.provider_id)
    {
      Some(existing) => Some(std::mem::replace(&mut existing.vm_id, snapshot.vm_id)),
      None => {
        self.snapshots.push(snapshot);
        None
      }
    }
  }

  /// Remove the snapshot for an entry at a provider.
  pub fn remove(&mut self, entry_id: &str, provider_id: &str) -> Option<Snapshot> {
    let index = self
      .snapshots
      .iter()
      .position(|s| s.entry_id == entry_id && s.provider_id == provider_id)?;
    Some(self.snapshots.remove(index))
  }

  pub fn len(&self) -> usize {
    self.snapshots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.snapshots.is_empty()
  }
}

/// Errors from snapshot storage.
#[derive(Debug, Error)]
pub enum SnapshotError {
  #[error("failed to create snapshot directory: {0}")]
  CreateDir(#[source] std::io::Error),

  #[error("failed to read snapshot table: {0}")]
  Read(#[source] std::io::Error),

  #[error("failed to write snapshot table: {0}")]
  Write(#[source] std::io::Error),

  #[error("failed to lock snapshot table: {0}")]
  Lock(#[source] std::io::Error),

  #[error("failed to parse snapshot table: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize snapshot table: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unsupported snapshot table version: {0}")]
  UnsupportedVersion(u32),
}
