use mockito::{Server, ServerGuard};
use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::*;

fn serve_listing(server: &mut ServerGuard) {
  serve_toolbox(server, "aws", "A", &[("aws", "ami-1")]);
  serve_toolbox(server, "nectar", "N", &[("nectar", "n-1")]);
  let listing = json!({"solutions": [
    {"name": "S1", "url": format!("{}/solutions/1", server.url()), "toolbox": format!("{}/toolboxes/aws", server.url())},
    {"name": "S2", "url": format!("{}/solutions/2", server.url()), "toolbox": format!("{}/toolboxes/nectar", server.url())},
  ]});
  serve_json(server, "/solutions", listing);
}

#[test]
fn solutions_lists_only_usable() {
  let mut server = Server::new();
  serve_listing(&mut server);
  let env = TestEnv::new();

  env
    .vl_cmd_for(&server, "aws")
    .arg("solutions")
    .assert()
    .success()
    .stdout(predicate::str::contains("S1"))
    .stdout(predicate::str::contains("S2").not());
}

#[test]
fn solutions_json_output() {
  let mut server = Server::new();
  serve_listing(&mut server);
  let env = TestEnv::new();

  let output = env
    .vl_cmd_for(&server, "aws,nectar")
    .args(["solutions", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  let json: Value = serde_json::from_slice(&output.stdout).unwrap();
  let names: Vec<_> = json.as_array().unwrap().iter().map(|s| s["name"].clone()).collect();
  assert_eq!(names, [json!("S1"), json!("S2")]);
}

#[test]
fn solutions_fails_when_catalogue_is_down() {
  let env = TestEnv::new();

  env
    .vl_cmd()
    .args(["--scm-url", "http://127.0.0.1:1", "solutions"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn problems_are_listed() {
  let mut server = Server::new();
  serve_json(
    &mut server,
    "/problems",
    json!({"problems": [{"id": "p-1", "name": "Gravity inversion"}]}),
  );
  let env = TestEnv::new();

  env
    .vl_cmd_for(&server, "aws")
    .arg("problems")
    .assert()
    .success()
    .stdout(predicate::str::contains("p-1"))
    .stdout(predicate::str::contains("Gravity inversion"));
}
