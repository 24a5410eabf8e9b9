use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Current version of the on-disk job table format.
pub const JOB_TABLE_VERSION: u32 = 1;

/// A compute job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
  pub id: i64,
  /// URL of the catalogue solution the job runs, once chosen.
  #[serde(default)]
  pub solution_id: Option<String>,
  /// Fields owned by the rest of the portal, carried through untouched.
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

impl Job {
  pub fn new(id: i64) -> Self {
    Self {
      id,
      solution_id: None,
      extra: BTreeMap::new(),
    }
  }

  pub fn with_solution(mut self, solution_id: impl Into<String>) -> Self {
    self.solution_id = Some(solution_id.into());
    self
  }
}

/// All jobs, at most one per id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTable {
  pub version: u32,
  pub jobs: Vec<Job>,
}

impl Default for JobTable {
  fn default() -> Self {
    Self::new()
  }
}

impl JobTable {
  pub fn new() -> Self {
    Self {
      version: JOB_TABLE_VERSION,
      jobs: Vec::new(),
    }
  }

  pub fn get(&self, id: i64) -> Option<&Job> {
    self.jobs.iter().find(|job| job.id == id)
  }

  /// Insert `job`, replacing any job with the same id.
  pub fn upsert(&mut self, job: Job) {
    match self.jobs.iter_mut().find(|existing| existing.id == job.id) {
      Some(existing) => *existing = job,
      None => self.jobs.push(job),
    }
  }
}

/// Errors from job storage.
#[derive(Debug, Error)]
pub enum JobError {
  #[error("failed to create job directory: {0}")]
  CreateDir(#[source] std::io::Error),

  #[error("failed to read job table: {0}")]
  Read(#[source] std::io::Error),

  #[error("failed to write job table: {0}")]
  Write(#[source] std::io::Error),

  #[error("failed to lock job table: {0}")]
  Lock(#[source] std::io::Error),

  #[error("failed to parse job table: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize job table: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unsupported job table version: {0}")]
  UnsupportedVersion(u32),
}
