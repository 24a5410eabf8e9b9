use std::collections::BTreeSet;

use mockito::Server;
use serde_json::json;
use vlab_lib::job::Job;
use vlab_lib::snapshot::Snapshot;

use super::common::*;

fn set(ids: &[&str]) -> BTreeSet<String> {
  ids.iter().map(|id| id.to_string()).collect()
}

#[tokio::test]
async fn images_grouped_for_registered_providers() {
  let mut server = Server::new_async().await;
  serve_solution(&mut server, "u", "t", json!([])).await;
  serve_toolbox(
    &mut server,
    "t",
    json!({"name": "T", "images": images(&[("aws", "ami-1"), ("aws", "ami-2"), ("nectar", "n-9")])}),
  )
  .await;
  let job = Job::new(1).with_solution(solution_url(&server, "u"));

  let test = pipeline_for(&server, &["aws", "nectar", "gcp"], vec![job], vec![]);
  let images = test.pipeline.images_for_job(Some(1)).await.unwrap().unwrap();

  assert_eq!(images.len(), 2);
  assert_eq!(images["aws"], set(&["ami-1", "ami-2"]));
  assert_eq!(images["nectar"], set(&["n-9"]));
  assert!(!images.contains_key("gcp"));

  let providers = test.pipeline.providers_for_job(Some(1)).await.unwrap().unwrap();
  assert_eq!(providers, set(&["aws", "nectar"]));
}

#[tokio::test]
async fn solution_for_job_fetches_attached_solution() {
  let mut server = Server::new_async().await;
  let mock = serve_solution(&mut server, "u", "t", json!([])).await;
  let job = Job::new(1).with_solution(solution_url(&server, "u"));

  let test = pipeline_for(&server, &["aws"], vec![], vec![]);
  let solution = test.pipeline.solution_for_job(&job).await.unwrap().unwrap();

  mock.assert_async().await;
  assert_eq!(solution.name, "solution u");
}

#[tokio::test]
async fn snapshot_substitution() {
  let server = Server::new_async().await;
  let test = pipeline_for(
    &server,
    &["aws", "gcp"],
    vec![],
    vec![Snapshot::new("sol-1", "aws", "ami-cached")],
  );

  assert_eq!(
    test.pipeline.snapshot_vm_id("sol-1", "aws").unwrap().as_deref(),
    Some("ami-cached")
  );
  assert_eq!(test.pipeline.snapshot_vm_id("sol-1", "gcp").unwrap(), None);
}
