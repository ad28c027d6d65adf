//! End-to-end builds through the CLI.
//!
//! Step commands use `/bin/sh`, so these run on Unix only.

#![cfg(unix)]

use predicates::prelude::*;
use serde_json::json;

use super::common::{TestEnv, git_available, init_repo, sh};

fn build_json(env: &TestEnv, name: &str) -> (bool, serde_json::Value) {
  let output = env
    .automat_cmd()
    .args(["build", name, "--json"])
    .output()
    .unwrap();
  let record = serde_json::from_slice(&output.stdout).unwrap();
  (output.status.success(), record)
}

#[test]
fn successful_build_prints_record() {
  let env = TestEnv::new();
  env.put_project(&json!({
    "name": "demo",
    "env": { "GREETING": "hello" },
    "steps": [ { "description": "greet", "command": sh("printf '%s' \"$GREETING\" > greeting.txt") } ]
  }));

  let (success, record) = build_json(&env, "demo");

  assert!(success);
  assert_eq!(record["name"], "demo");
  assert_eq!(record["steps"][0]["status"], "OK");
  assert_eq!(record["hash"].as_str().unwrap().len(), 64);
  assert!(record["duration"].is_u64());
  let greeting = std::fs::read_to_string(env.build_root("demo").join("greeting.txt")).unwrap();
  assert_eq!(greeting, "hello");
}

#[test]
fn failed_step_exits_non_zero_and_skips_rest() {
  let env = TestEnv::new();
  env.put_project(&json!({
    "name": "demo",
    "steps": [
      { "command": sh("exit 4") },
      { "command": sh("touch after") }
    ]
  }));

  let (success, record) = build_json(&env, "demo");

  assert!(!success);
  assert_eq!(record["steps"][0]["status"], "FAILED");
  assert_eq!(record["steps"][1]["status"], "SKIPPED");
  assert!(!env.build_root("demo").join("after").exists());
}

#[test]
fn hash_does_not_depend_on_outcome() {
  let env = TestEnv::new();
  env.write_file("marker", "");
  let script = format!("test -e {}", env.temp.path().join("marker").display());
  env.put_project(&json!({ "name": "demo", "steps": [ { "command": sh(&script) } ] }));

  let (first_ok, first) = build_json(&env, "demo");
  std::fs::remove_file(env.temp.path().join("marker")).unwrap();
  let (second_ok, second) = build_json(&env, "demo");

  assert!(first_ok);
  assert!(!second_ok);
  assert_eq!(first["hash"], second["hash"]);
}

#[test]
fn status_shows_last_record() {
  let env = TestEnv::new();
  env.put_project(&json!({ "name": "demo", "steps": [ { "command": sh("true") } ] }));
  let (_, built) = build_json(&env, "demo");

  let output = env
    .automat_cmd()
    .args(["status", "demo", "--json"])
    .output()
    .unwrap();
  assert!(output.status.success());
  let saved: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(saved, built);

  env
    .automat_cmd()
    .args(["status", "demo"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build of 'demo' succeeded"))
    .stdout(predicate::str::contains(built["hash"].as_str().unwrap()));
}

#[test]
fn text_summary_lists_steps() {
  let env = TestEnv::new();
  env.put_project(&json!({
    "name": "demo",
    "steps": [ { "command": sh("exit 1") }, { "command": sh("true") } ]
  }));

  env
    .automat_cmd()
    .args(["build", "demo"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build of 'demo' failed (1 failed, 1 skipped)"))
    .stdout(predicate::str::contains("FAILED"))
    .stdout(predicate::str::contains("SKIPPED"));
}

#[test]
fn step_output_goes_to_log_file() {
  let env = TestEnv::new();
  env.put_project(&json!({ "name": "demo", "steps": [ { "command": sh("echo from-step") } ] }));
  let log = env.temp.path().join("build.log");

  env
    .automat_cmd()
    .args(["build", "demo", "--json", "--log"])
    .arg(&log)
    .assert()
    .success()
    .stdout(predicate::str::contains("from-step").not());

  assert!(std::fs::read_to_string(&log).unwrap().contains("from-step"));
}

#[test]
fn unreachable_component_fails_checkout() {
  let env = TestEnv::new();
  let missing = env.temp.path().join("no-such-repo");
  env.put_project(&json!({
    "name": "demo",
    "components": { "lib": { "url": missing.display().to_string(), "revision": "main" } },
    "steps": [ { "command": sh("touch ran") } ]
  }));

  let (success, record) = build_json(&env, "demo");

  assert!(!success);
  assert_eq!(record["components"]["lib"]["status"], "FAILED");
  assert_eq!(record["components"]["lib"]["revision"], "main");
  assert_eq!(record["steps"][0]["status"], "SKIPPED");
  assert!(!env.build_root("demo").join("ran").exists());
}

#[test]
fn builds_git_component() {
  if !git_available() {
    eprintln!("git not available, skipping");
    return;
  }

  let env = TestEnv::new();
  let upstream = env.temp.path().join("upstream");
  let head = init_repo(&upstream, &[("build.sh", "echo built > artifact\n")]);

  env.put_project(&json!({
    "name": "demo",
    "components": { "lib": { "url": upstream.display().to_string(), "revision": head } },
    "steps": [ { "directory": "lib", "command": ["/bin/sh", "build.sh"] } ]
  }));

  let (success, record) = build_json(&env, "demo");

  assert!(success, "record: {}", record);
  assert_eq!(record["components"]["lib"]["status"], "OK");
  assert_eq!(record["components"]["lib"]["revision"], head);
  assert!(env.build_root("demo").join("lib").join("artifact").exists());

  // A second build cleans the working copy and hashes identically.
  let (again, second) = build_json(&env, "demo");
  assert!(again);
  assert_eq!(record["hash"], second["hash"]);
}
