//! Job storage.
//!
//! Each call is a short, self-contained read or read-modify-write of the job
//! table; no call is held open across catalogue requests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::platform::paths::jobs_file;
use crate::util::fs::{ensure_parent, read_optional, write_atomic};
use crate::util::lock::TableLock;

use super::types::{JOB_TABLE_VERSION, Job, JobError, JobTable};

/// Access to job records.
pub trait JobStore: Send + Sync {
  /// The job with `id`, or `None` if there is none.
  fn get(&self, id: i64) -> Result<Option<Job>, JobError>;

  /// Insert or replace `job`.
  fn save(&self, job: &Job) -> Result<(), JobError>;
}

/// Job table kept in a JSON file.
#[derive(Debug)]
pub struct FileJobStore {
  path: PathBuf,
}

impl FileJobStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Store at the default location (`{data_dir}/jobs.json`).
  pub fn default_store() -> Self {
    Self::new(jobs_file())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Load the job table. A missing file is an empty table.
  pub fn load_table(&self) -> Result<JobTable, JobError> {
    let Some(content) = read_optional(&self.path).map_err(JobError::Read)? else {
      return Ok(JobTable::new());
    };

    let table: JobTable = serde_json::from_str(&content).map_err(JobError::Parse)?;
    if table.version != JOB_TABLE_VERSION {
      return Err(JobError::UnsupportedVersion(table.version));
    }

    Ok(table)
  }

  /// Hold the table lock for a read-modify-write cycle.
  fn lock(&self) -> Result<TableLock, JobError> {
    ensure_parent(&self.path).map_err(JobError::CreateDir)?;
    TableLock::acquire(&self.path).map_err(JobError::Lock)
  }

  fn save_table(&self, table: &JobTable) -> Result<(), JobError> {
    let content = serde_json::to_string_pretty(table).map_err(JobError::Serialize)?;
    write_atomic(&self.path, &content).map_err(JobError::Write)
  }
}

impl JobStore for FileJobStore {
  fn get(&self, id: i64) -> Result<Option<Job>, JobError> {
    Ok(self.load_table()?.get(id).cloned())
  }

  fn save(&self, job: &Job) -> Result<(), JobError> {
    let _lock = self.lock()?;

    debug!(job_id = job.id, solution = ?job.solution_id, "saving job");
    let mut table = self.load_table()?;
    table.upsert(job.clone());
    self.save_table(&table)
  }
}

/// In-process job store.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
  jobs: RwLock<BTreeMap<i64, Job>>,
}

impl MemoryJobStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl FromIterator<Job> for MemoryJobStore {
  fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
    let jobs = iter.into_iter().map(|job| (job.id, job)).collect();
    Self { jobs: RwLock::new(jobs) }
  }
}

impl JobStore for MemoryJobStore {
  fn get(&self, id: i64) -> Result<Option<Job>, JobError> {
    let jobs = self.jobs.read().unwrap_or_else(PoisonError::into_inner);
    Ok(jobs.get(&id).cloned())
  }

  fn save(&self, job: &Job) -> Result<(), JobError> {
    let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
    jobs.insert(job.id, job.clone());
    Ok(())
  }
}
