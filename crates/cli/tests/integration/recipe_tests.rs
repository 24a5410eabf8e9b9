use mockito::Server;
use predicates::prelude::*;
use serde_json::json;

use super::common::*;

#[test]
fn recipe_is_printed() {
  let mut server = Server::new();
  serve_solution(&mut server, "1", "t", json!([{"type": "system", "name": "make"}]));
  serve_toolbox(&mut server, "t", "Escript", &[("aws", "ami-1")]);
  let env = TestEnv::new();

  env
    .vl_cmd_for(&server, "aws")
    .args(["recipe", &format!("{}/solutions/1", server.url())])
    .assert()
    .success()
    .stdout(predicate::str::contains("class vl_escript {"))
    .stdout(predicate::str::contains(r#"package { "make":"#));
}

#[test]
fn recipe_is_written_to_file() {
  let mut server = Server::new();
  serve_solution(&mut server, "1", "t", json!([]));
  serve_toolbox(&mut server, "t", "Escript", &[]);
  let env = TestEnv::new();
  let out = env.temp.path().join("escript.pp");

  env
    .vl_cmd_for(&server, "aws")
    .args(["recipe", &format!("{}/solutions/1", server.url()), "--out"])
    .arg(&out)
    .assert()
    .success();

  let recipe = std::fs::read_to_string(&out).unwrap();
  assert!(recipe.contains("class vl_escript {"));
}

#[test]
fn recipe_with_unusable_name_fails_without_output() {
  let mut server = Server::new();
  serve_solution(&mut server, "1", "t", json!([]));
  serve_toolbox(&mut server, "t", "!!!", &[]);
  let env = TestEnv::new();
  let out = env.temp.path().join("bad.pp");

  env
    .vl_cmd_for(&server, "aws")
    .args(["recipe", &format!("{}/solutions/1", server.url()), "--out"])
    .arg(&out)
    .assert()
    .failure()
    .stderr(predicate::str::contains("identifier"));

  assert!(!out.exists());
}

#[test]
fn recipe_with_unreachable_catalogue_fails() {
  let env = TestEnv::new();

  env
    .vl_cmd()
    .args(["recipe", "http://127.0.0.1:1/solutions/1"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty());
}
