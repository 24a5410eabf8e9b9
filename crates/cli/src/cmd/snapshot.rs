use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

use vlab_lib::Config;
use vlab_lib::snapshot::{FileSnapshotStore, Snapshot};

use crate::output::{OutputFormat, print_info, print_json, print_success, print_warning};

#[derive(Subcommand, Debug)]
pub enum SnapshotCommand {
  /// Look up the VM id of a pre-built image
  Get {
    /// Catalogue entry id
    entry: String,

    /// Provider id
    provider: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Record a pre-built image
  Set {
    /// Catalogue entry id
    entry: String,

    /// Provider id
    provider: String,

    /// VM id of the image
    vm_id: String,
  },

  /// Forget a pre-built image
  Remove {
    /// Catalogue entry id
    entry: String,

    /// Provider id
    provider: String,
  },

  /// List recorded images
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

#[derive(Serialize)]
struct LookupResult<'a> {
  entry_id: &'a str,
  provider_id: &'a str,
  vm_id: Option<String>,
}

pub fn cmd_snapshot(config: &Config, command: SnapshotCommand) -> Result<()> {
  match command {
    SnapshotCommand::Get {
      entry,
      provider,
      output,
    } => cmd_get(config, &entry, &provider, output),
    SnapshotCommand::Set {
      entry,
      provider,
      vm_id,
    } => cmd_set(config, entry, provider, vm_id),
    SnapshotCommand::Remove { entry, provider } => cmd_remove(config, &entry, &provider),
    SnapshotCommand::List { output } => cmd_list(config, output),
  }
}

fn cmd_get(config: &Config, entry: &str, provider: &str, output: OutputFormat) -> Result<()> {
  let (pipeline, _rt) = super::pipeline(config)?;
  let vm_id = pipeline.snapshot_vm_id(entry, provider)?;

  if output.is_json() {
    return print_json(&LookupResult {
      entry_id: entry,
      provider_id: provider,
      vm_id,
    });
  }

  match vm_id {
    Some(vm_id) => println!("{}", vm_id),
    None => print_info(&format!("No snapshot for {} at {}", entry, provider)),
  }
  Ok(())
}

fn cmd_set(config: &Config, entry: String, provider: String, vm_id: String) -> Result<()> {
  let store = FileSnapshotStore::new(config.snapshots_file());
  let snapshot = Snapshot::new(entry, provider, vm_id);

  match store.record(snapshot.clone())? {
    Some(previous) if previous != snapshot.vm_id => {
      print_warning(&format!("Replaced previous snapshot {}", previous));
    }
    _ => {}
  }

  info!(entry = %snapshot.entry_id, provider = %snapshot.provider_id, vm_id = %snapshot.vm_id, "recorded snapshot");
  print_success(&format!(
    "Recorded {} for {} at {}",
    snapshot.vm_id, snapshot.entry_id, snapshot.provider_id
  ));
  Ok(())
}

fn cmd_remove(config: &Config, entry: &str, provider: &str) -> Result<()> {
  let store = FileSnapshotStore::new(config.snapshots_file());

  if store.remove(entry, provider)? {
    print_success(&format!("Removed snapshot for {} at {}", entry, provider));
  } else {
    print_info(&format!("No snapshot for {} at {}", entry, provider));
  }
  Ok(())
}

fn cmd_list(config: &Config, output: OutputFormat) -> Result<()> {
  let store = FileSnapshotStore::new(config.snapshots_file());
  let snapshots = store.list()?;

  if output.is_json() {
    return print_json(&snapshots);
  }

  if snapshots.is_empty() {
    print_info("No snapshots found");
    return Ok(());
  }

  for s in &snapshots {
    println!("{} {} {}", s.entry_id, s.provider_id, s.vm_id);
  }
  print_info(&format!("{} snapshot(s) total", snapshots.len()));
  Ok(())
}
