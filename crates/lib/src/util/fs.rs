//! File helpers shared by the on-disk stores.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Read `path` to a string, or `None` if it does not exist.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e),
  }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
    _ => Ok(()),
  }
}

/// Write `content` to `path` via a uniquely named sibling temp file and rename,
/// so readers never observe a partially written file and concurrent writers
/// never share a temp file.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut temp = NamedTempFile::new_in(dir)?;
  temp.write_all(content.as_bytes())?;
  temp.as_file().sync_all()?;
  temp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
