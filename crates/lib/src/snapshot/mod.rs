//! VM image snapshots.
//!
//! A snapshot records that a VM image has already been built for a catalogue
//! entry at a compute provider, so the image can be used instead of
//! provisioning a fresh VM at runtime.

mod storage;
mod types;

pub use storage::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use types::{SNAPSHOT_TABLE_VERSION, Snapshot, SnapshotError, SnapshotTable};
