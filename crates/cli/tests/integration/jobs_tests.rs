use mockito::Server;
use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::*;

#[test]
fn images_for_job_grouped_by_provider() {
  let mut server = Server::new();
  serve_solution(&mut server, "u", "t", json!([]));
  serve_toolbox(&mut server, "t", "T", &[("aws", "ami-1"), ("aws", "ami-2"), ("nectar", "n-9")]);
  let env = TestEnv::new();
  env.write_jobs(json!([{"id": 1, "solution_id": format!("{}/solutions/u", server.url())}]));

  let output = env
    .vl_cmd_for(&server, "aws,nectar,gcp")
    .args(["images", "1", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  let images: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(images, json!({"aws": ["ami-1", "ami-2"], "nectar": ["n-9"]}));
}

#[test]
fn providers_for_job() {
  let mut server = Server::new();
  serve_solution(&mut server, "u", "t", json!([]));
  serve_toolbox(&mut server, "t", "T", &[("aws", "ami-1"), ("azure", "az-1")]);
  let env = TestEnv::new();
  env.write_jobs(json!([{"id": 4, "solution_id": format!("{}/solutions/u", server.url())}]));

  env
    .vl_cmd_for(&server, "aws,gcp")
    .args(["providers", "4"])
    .assert()
    .success()
    .stdout(predicate::str::contains("aws"))
    .stdout(predicate::str::contains("azure").not());
}

#[test]
fn images_for_unknown_job_is_empty() {
  let env = TestEnv::new();

  env
    .vl_cmd()
    .args(["images", "12"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No images"));
}

#[test]
fn attach_updates_job_and_keeps_other_fields() {
  let env = TestEnv::new();
  env.write_jobs(json!([{"id": 2, "name": "inversion run"}]));

  env
    .vl_cmd()
    .args(["attach", "2", "http://scm/solutions/5"])
    .assert()
    .success();

  let table = env.read_jobs();
  assert_eq!(table["jobs"][0]["solution_id"], "http://scm/solutions/5");
  assert_eq!(table["jobs"][0]["name"], "inversion run");
}

#[test]
fn attach_to_unknown_job_fails() {
  let env = TestEnv::new();

  env
    .vl_cmd()
    .args(["attach", "99", "http://scm/solutions/5"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("job 99 not found"));
}

#[test]
fn concurrent_attach_processes_keep_every_write() {
  let env = TestEnv::new();
  env.write_jobs(json!((1..=6).map(|id| json!({"id": id})).collect::<Vec<_>>()));

  std::thread::scope(|scope| {
    for id in 1..=6 {
      let env = &env;
      scope.spawn(move || {
        env
          .vl_cmd()
          .args(["attach", &id.to_string(), &format!("http://scm/solutions/{id}")])
          .assert()
          .success();
      });
    }
  });

  let table = env.read_jobs();
  let jobs = table["jobs"].as_array().unwrap();
  assert_eq!(jobs.len(), 6);
  for job in jobs {
    let id = job["id"].as_i64().unwrap();
    assert_eq!(job["solution_id"], format!("http://scm/solutions/{id}"), "attach to job {id} was lost");
  }
}
