use mockito::Server;
use serde_json::json;

use super::common::*;

#[tokio::test]
async fn only_solutions_with_registered_images_are_listed() {
  let mut server = Server::new_async().await;
  serve_toolbox(&mut server, "aws", json!({"name": "A", "images": images(&[("aws", "ami-1")])})).await;
  serve_toolbox(&mut server, "nectar", json!({"name": "N", "images": images(&[("nectar", "n-1")])})).await;
  let listing = json!({"solutions": [
    {"name": "S1", "url": solution_url(&server, "1"), "toolbox": toolbox_url(&server, "aws")},
    {"name": "S2", "url": solution_url(&server, "2"), "toolbox": toolbox_url(&server, "nectar")},
  ]});
  serve_json(&mut server, "/solutions", listing).await;

  let test = pipeline_for(&server, &["aws"], vec![], vec![]);
  let useful = test.pipeline.list_usable_solutions(None).await.unwrap();

  assert_eq!(useful.len(), 1);
  assert_eq!(useful[0].name, "S1");
}

#[tokio::test]
async fn solution_with_several_matching_images_is_listed_once() {
  let mut server = Server::new_async().await;
  serve_toolbox(
    &mut server,
    "multi",
    json!({"name": "M", "images": images(&[("aws", "ami-1"), ("aws", "ami-2"), ("nectar", "n-1")])}),
  )
  .await;
  let listing = json!({"solutions": [
    {"name": "S1", "url": solution_url(&server, "1"), "toolbox": toolbox_url(&server, "multi")},
  ]});
  serve_json(&mut server, "/solutions", listing).await;

  let test = pipeline_for(&server, &["aws", "nectar"], vec![], vec![]);
  let useful = test.pipeline.list_usable_solutions(None).await.unwrap();

  assert_eq!(useful.len(), 1);
}

#[tokio::test]
async fn broken_toolbox_does_not_fail_listing() {
  let mut server = Server::new_async().await;
  serve_toolbox(&mut server, "ok", json!({"name": "A", "images": images(&[("aws", "ami-1")])})).await;
  server
    .mock("GET", "/toolboxes/broken")
    .with_status(500)
    .create_async()
    .await;
  let listing = json!({"solutions": [
    {"name": "S1", "url": solution_url(&server, "1"), "toolbox": toolbox_url(&server, "broken")},
    {"name": "S2", "url": solution_url(&server, "2"), "toolbox": toolbox_url(&server, "ok")},
  ]});
  serve_json(&mut server, "/solutions", listing).await;

  let test = pipeline_for(&server, &["aws"], vec![], vec![]);
  let useful = test.pipeline.list_usable_solutions(None).await.unwrap();

  assert_eq!(useful.len(), 1);
  assert_eq!(useful[0].name, "S2");
}

#[tokio::test]
async fn listing_failure_is_an_error() {
  let mut server = Server::new_async().await;
  server.mock("GET", "/solutions").with_status(502).create_async().await;

  let test = pipeline_for(&server, &["aws"], vec![], vec![]);
  let err = test.pipeline.list_usable_solutions(None).await.unwrap_err();

  assert!(matches!(err, vlab_lib::PipelineError::Catalogue(ref e) if e.is_unavailable()));
}

#[tokio::test]
async fn problems_are_listed() {
  let mut server = Server::new_async().await;
  serve_json(
    &mut server,
    "/problems",
    json!({"problems": [{"id": "p-1", "name": "Gravity"}, {"id": "p-2", "name": "Magnetics"}]}),
  )
  .await;

  let test = pipeline_for(&server, &[], vec![], vec![]);
  let problems = test.pipeline.list_problems().await.unwrap();

  let ids: Vec<_> = problems.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, ["p-1", "p-2"]);
}
