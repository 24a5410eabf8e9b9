//! Jobs as seen by the pipeline.
//!
//! Job records belong to the wider portal; the pipeline reads a job's
//! `solution_id` and writes it when a solution is attached.

mod storage;
mod types;

pub use storage::{FileJobStore, JobStore, MemoryJobStore};
pub use types::{JOB_TABLE_VERSION, Job, JobError, JobTable};
