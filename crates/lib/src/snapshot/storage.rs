//! Snapshot storage.
//!
//! # Storage Layout
//!
//! ```text
//! {data_dir}/snapshots.json   # SnapshotTable: version + snapshot records
//! ```
//!
//! The pipeline only ever reads snapshots through [`SnapshotStore::lookup`];
//! writes happen out of band (image builds, operator tooling).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::platform::paths::snapshots_file;
use crate::util::fs::{ensure_parent, read_optional, write_atomic};
use crate::util::lock::TableLock;

use super::types::{SNAPSHOT_TABLE_VERSION, Snapshot, SnapshotError, SnapshotTable};

/// Read access to snapshots, keyed by `(entry_id, provider_id)`.
pub trait SnapshotStore: Send + Sync {
  /// The VM id built for `entry_id` at `provider_id`, if any.
  ///
  /// A missing snapshot is `Ok(None)`, not an error.
  fn lookup(&self, entry_id: &str, provider_id: &str) -> Result<Option<String>, SnapshotError>;
}

/// Snapshot table kept in a JSON file.
///
/// Every operation reads the file afresh. Writes go through a temp file and
/// rename. Read-modify-write cycles hold `{path}.lock`, so writers in other
/// processes (or other store instances) cannot drop each other's records.
#[derive(Debug)]
pub struct FileSnapshotStore {
  path: PathBuf,
}

impl FileSnapshotStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Store at the default location (`{data_dir}/snapshots.json`).
  pub fn default_store() -> Self {
    Self::new(snapshots_file())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Load the snapshot table. A missing file is an empty table.
  pub fn load_table(&self) -> Result<SnapshotTable, SnapshotError> {
    let Some(content) = read_optional(&self.path).map_err(SnapshotError::Read)? else {
      return Ok(SnapshotTable::new());
    };

    let table: SnapshotTable = serde_json::from_str(&content).map_err(SnapshotError::Parse)?;
    if table.version != SNAPSHOT_TABLE_VERSION {
      return Err(SnapshotError::UnsupportedVersion(table.version));
    }

    Ok(table)
  }

  /// Hold the table lock for a read-modify-write cycle.
  fn lock(&self) -> Result<TableLock, SnapshotError> {
    ensure_parent(&self.path).map_err(SnapshotError::CreateDir)?;
    TableLock::acquire(&self.path).map_err(SnapshotError::Lock)
  }

  fn save_table(&self, table: &SnapshotTable) -> Result<(), SnapshotError> {
    let content = serde_json::to_string_pretty(table).map_err(SnapshotError::Serialize)?;
    write_atomic(&self.path, &content).map_err(SnapshotError::Write)
  }

  /// Record `snapshot`, replacing any earlier one for the same pair.
  ///
  /// Returns the replaced VM id.
  pub fn record(&self, snapshot: Snapshot) -> Result<Option<String>, SnapshotError> {
    let _lock = self.lock()?;

    debug!(entry = %snapshot.entry_id, provider = %snapshot.provider_id, vm = %snapshot.vm_id, "recording snapshot");
    let mut table = self.load_table()?;
    let previous = table.upsert(snapshot);
    self.save_table(&table)?;

    Ok(previous)
  }

  /// Remove the snapshot for a pair. Returns whether one existed.
  pub fn remove(&self, entry_id: &str, provider_id: &str) -> Result<bool, SnapshotError> {
    let _lock = self.lock()?;

    let mut table = self.load_table()?;
    if table.remove(entry_id, provider_id).is_none() {
      return Ok(false);
    }
    self.save_table(&table)?;

    Ok(true)
  }

  /// All recorded snapshots, in insertion order.
  pub fn list(&self) -> Result<Vec<Snapshot>, SnapshotError> {
    Ok(self.load_table()?.snapshots)
  }
}

impl SnapshotStore for FileSnapshotStore {
  fn lookup(&self, entry_id: &str, provider_id: &str) -> Result<Option<String>, SnapshotError> {
    let table = self.load_table()?;
    Ok(table.find(entry_id, provider_id).map(|s| s.vm_id.clone()))
  }
}

/// In-process snapshot store.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
  entries: RwLock<BTreeMap<(String, String), String>>,
}

impl MemorySnapshotStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record `snapshot`, returning the replaced VM id.
  pub fn record(&self, snapshot: Snapshot) -> Option<String> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    entries.insert((snapshot.entry_id, snapshot.provider_id), snapshot.vm_id)
  }
}

impl FromIterator<Snapshot> for MemorySnapshotStore {
  fn from_iter<I: IntoIterator<Item = Snapshot>>(iter: I) -> Self {
    let store = Self::new();
    for snapshot in iter {
      store.record(snapshot);
    }
    store
  }
}

impl SnapshotStore for MemorySnapshotStore {
  fn lookup(&self, entry_id: &str, provider_id: &str) -> Result<Option<String>, SnapshotError> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.get(&(entry_id.to_string(), provider_id.to_string())).cloned())
  }
}
