use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::TestEnv;

#[test]
fn snapshot_get_missing() {
  let env = TestEnv::new();

  env
    .vl_cmd()
    .args(["snapshot", "get", "sol-1", "aws"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No snapshot"));
}

#[test]
fn snapshot_set_then_get() {
  let env = TestEnv::new();

  env
    .vl_cmd()
    .args(["snapshot", "set", "sol-1", "aws", "ami-cached"])
    .assert()
    .success();

  env
    .vl_cmd()
    .args(["snapshot", "get", "sol-1", "aws"])
    .assert()
    .success()
    .stdout(predicate::str::contains("ami-cached"));

  let output = env
    .vl_cmd()
    .args(["snapshot", "get", "sol-1", "gcp", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());
  let lookup: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(lookup["vm_id"], Value::Null);
}

#[test]
fn snapshot_list_and_remove() {
  let env = TestEnv::new();
  env
    .vl_cmd()
    .args(["snapshot", "set", "sol-1", "aws", "ami-1"])
    .assert()
    .success();

  let output = env.vl_cmd().args(["snapshot", "list", "-o", "json"]).output().unwrap();
  let list: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(list, json!([{"entry_id": "sol-1", "provider_id": "aws", "vm_id": "ami-1"}]));

  env
    .vl_cmd()
    .args(["snapshot", "remove", "sol-1", "aws"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"));

  env
    .vl_cmd()
    .args(["snapshot", "list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No snapshots"));
}
