//! Pipeline configuration.
//!
//! Resolution order:
//! 1. An explicit config file path, which must exist
//! 2. `{config_dir}/config.json`, if present
//! 3. Built-in defaults
//!
//! Environment overrides (`VLAB_SCM_URL`, `VLAB_PROVIDERS`) are applied last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, DEFAULT_SCM_URL, ENV_PROVIDERS, ENV_SCM_URL,
};
use crate::platform::paths::{config_file, jobs_file, snapshots_file};
use crate::provider::ProviderRegistry;
use crate::scm::Timeouts;
use crate::util::fs::read_optional;

/// Errors that can occur loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read config file {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// A timeout of zero would make every catalogue request fail at once.
  #[error("invalid config file {}: {field} must be at least 1 second", path.display())]
  ZeroTimeout { path: PathBuf, field: &'static str },
}

/// Everything the pipeline needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Catalogue base URL.
  pub scm_url: String,
  /// Ids of the compute providers configured for this installation.
  pub providers: Vec<String>,
  /// HTTP connect timeout, in seconds.
  pub connect_timeout: u64,
  /// HTTP read timeout, in seconds.
  pub read_timeout: u64,
  /// Recipe template overriding the built-in Puppet template.
  pub template: Option<PathBuf>,
  /// Snapshot table location; defaults to `{data_dir}/snapshots.json`.
  pub snapshots_path: Option<PathBuf>,
  /// Job table location; defaults to `{data_dir}/jobs.json`.
  pub jobs_path: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      scm_url: DEFAULT_SCM_URL.to_string(),
      providers: Vec::new(),
      connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
      read_timeout: DEFAULT_READ_TIMEOUT_SECS,
      template: None,
      snapshots_path: None,
      jobs_path: None,
    }
  }
}

impl Config {
  /// Load configuration, then apply environment overrides.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    let mut config = match path {
      Some(path) => Self::from_file(path)?,
      None => {
        let default_path = config_file();
        if default_path.exists() {
          Self::from_file(&default_path)?
        } else {
          debug!(path = %default_path.display(), "no config file, using defaults");
          Self::default()
        }
      }
    };

    config.apply_env();
    Ok(config)
  }

  /// Parse the config file at `path`.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = read_optional(path)
      .map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?
      .ok_or_else(|| ConfigError::NotFound {
        path: path.to_path_buf(),
      })?;

    let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    for (field, secs) in [("connect_timeout", config.connect_timeout), ("read_timeout", config.read_timeout)] {
      if secs == 0 {
        return Err(ConfigError::ZeroTimeout {
          path: path.to_path_buf(),
          field,
        });
      }
    }

    debug!(path = %path.display(), "loaded config file");
    Ok(config)
  }

  /// Apply `VLAB_SCM_URL` and `VLAB_PROVIDERS` overrides. Empty values are ignored.
  pub fn apply_env(&mut self) {
    if let Some(url) = env_value(ENV_SCM_URL) {
      self.scm_url = url;
    }

    if let Some(providers) = env_value(ENV_PROVIDERS) {
      self.providers = providers
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    }
  }

  pub fn timeouts(&self) -> Timeouts {
    Timeouts {
      connect: Duration::from_secs(self.connect_timeout),
      read: Duration::from_secs(self.read_timeout),
    }
  }

  pub fn registry(&self) -> ProviderRegistry {
    ProviderRegistry::new(self.providers.iter().cloned())
  }

  pub fn snapshots_file(&self) -> PathBuf {
    self.snapshots_path.clone().unwrap_or_else(snapshots_file)
  }

  pub fn jobs_file(&self) -> PathBuf {
    self.jobs_path.clone().unwrap_or_else(jobs_file)
  }
}

fn env_value(key: &str) -> Option<String> {
  let value = std::env::var(key).ok()?;
  let value = value.trim();
  (!value.is_empty()).then(|| value.to_string())
}
