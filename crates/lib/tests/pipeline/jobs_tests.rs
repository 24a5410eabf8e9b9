use std::sync::Arc;

use mockito::Server;
use tempfile::TempDir;
use vlab_lib::job::{FileJobStore, Job, JobStore};
use vlab_lib::provider::ProviderRegistry;
use vlab_lib::recipe::RecipeRenderer;
use vlab_lib::scm::{CatalogueClient, Timeouts};
use vlab_lib::snapshot::MemorySnapshotStore;
use vlab_lib::{Pipeline, PipelineError};

use super::common::*;

#[tokio::test]
async fn attach_then_query_images() {
  let mut server = Server::new_async().await;
  serve_solution(&mut server, "7", "t", serde_json::json!([])).await;
  serve_toolbox(
    &mut server,
    "t",
    serde_json::json!({"name": "T", "images": images(&[("aws", "ami-7")])}),
  )
  .await;

  let test = pipeline_for(&server, &["aws"], vec![Job::new(3)], vec![]);
  assert!(test.pipeline.images_for_job(Some(3)).await.unwrap().unwrap().is_empty());

  test.pipeline.attach_solution_to_job(3, &solution_url(&server, "7")).unwrap();

  let images = test.pipeline.images_for_job(Some(3)).await.unwrap().unwrap();
  assert!(images["aws"].contains("ami-7"));
}

#[tokio::test]
async fn attach_to_missing_job_fails() {
  let server = Server::new_async().await;
  let test = pipeline_for(&server, &["aws"], vec![], vec![]);

  let err = test.pipeline.attach_solution_to_job(42, "http://scm/solutions/1").unwrap_err();

  assert!(matches!(err, PipelineError::JobNotFound(42)));
  assert!(test.jobs.get(42).unwrap().is_none());
}

#[test]
fn attach_persists_to_job_file() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("jobs.json");
  FileJobStore::new(&path).save(&Job::new(9)).unwrap();

  let pipeline = Pipeline::new(
    CatalogueClient::new("http://127.0.0.1:1", Timeouts::default()).unwrap(),
    ProviderRegistry::new(["aws"]),
    RecipeRenderer::new().unwrap(),
    Arc::new(MemorySnapshotStore::new()),
    Arc::new(FileJobStore::new(&path)),
  );
  pipeline.attach_solution_to_job(9, "http://scm/solutions/2").unwrap();

  let reloaded = FileJobStore::new(&path).get(9).unwrap().unwrap();
  assert_eq!(reloaded.solution_id.as_deref(), Some("http://scm/solutions/2"));
}
