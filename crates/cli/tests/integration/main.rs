//! CLI integration tests for vl, run against a mock catalogue.

mod jobs_tests;
mod recipe_tests;
mod snapshot_tests;
mod solutions_tests;
