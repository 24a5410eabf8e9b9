//! Advisory locks serializing read-modify-write cycles on the table files.
//!
//! A table at `jobs.json` is guarded by `jobs.json.lock` next to it. The lock
//! is taken on a freshly opened handle, so it excludes other handles in this
//! process as well as other processes. It is released when the guard drops.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Exclusive lock on a table file, held until dropped.
#[derive(Debug)]
pub struct TableLock {
  _file: File,
  lock_path: PathBuf,
}

impl TableLock {
  /// Block until the exclusive lock for `table_path` is held.
  ///
  /// The parent directory must already exist.
  pub fn acquire(table_path: &Path) -> io::Result<Self> {
    let lock_path = lock_path(table_path);
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(false)
      .open(&lock_path)?;

    lock_exclusive(&file)?;
    trace!(path = %lock_path.display(), "table lock acquired");

    Ok(Self { _file: file, lock_path })
  }

  pub fn lock_path(&self) -> &Path {
    &self.lock_path
  }
}

fn lock_path(table_path: &Path) -> PathBuf {
  let mut name = OsString::from(table_path.as_os_str());
  name.push(".lock");
  PathBuf::from(name)
}

#[cfg(unix)]
fn lock_exclusive(file: &File) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};
  use std::os::unix::io::AsFd;

  flock(file.as_fd(), FlockOperation::LockExclusive).map_err(|e| io::Error::from_raw_os_error(e.raw_os_error()))
}

#[cfg(windows)]
fn lock_exclusive(file: &File) -> io::Result<()> {
  use std::os::windows::io::AsRawHandle;
  use windows_sys::Win32::Foundation::HANDLE;
  use windows_sys::Win32::Storage::FileSystem::{LOCKFILE_EXCLUSIVE_LOCK, LockFileEx};

  let handle = file.as_raw_handle() as HANDLE;

  // SAFETY: OVERLAPPED is a plain data struct that is valid when zero-initialized.
  // LockFileEx is safe to call with a valid file handle and zeroed OVERLAPPED.
  let result = unsafe {
    let mut overlapped = std::mem::zeroed();
    LockFileEx(handle, LOCKFILE_EXCLUSIVE_LOCK, 0, 1, 0, &mut overlapped)
  };

  if result == 0 {
    Err(io::Error::last_os_error())
  } else {
    Ok(())
  }
}
