use crate::consts::APP_NAME;
use std::path::PathBuf;

/// Configuration file name within the config directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Snapshot table file name within the data directory.
pub const SNAPSHOTS_FILENAME: &str = "snapshots.json";

/// Job table file name within the data directory.
pub const JOBS_FILENAME: &str = "jobs.json";

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  std::env::var_os("USERPROFILE").map(PathBuf::from).unwrap_or_default()
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default()
}

/// Returns the directory for configuration files for the application
#[cfg(windows)]
pub fn config_dir() -> PathBuf {
  std::env::var_os("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(home_dir)
    .join(APP_NAME)
}

/// Returns the directory for configuration files for the application
#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
  let config_home = std::env::var("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".config"));
  config_home.join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  std::env::var_os("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(home_dir)
    .join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Default location of the configuration file.
pub fn config_file() -> PathBuf {
  config_dir().join(CONFIG_FILENAME)
}

/// Default location of the snapshot table.
pub fn snapshots_file() -> PathBuf {
  data_dir().join(SNAPSHOTS_FILENAME)
}

/// Default location of the job table.
pub fn jobs_file() -> PathBuf {
  data_dir().join(JOBS_FILENAME)
}
