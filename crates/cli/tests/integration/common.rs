//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the data root and any
/// project files or upstream repositories the test creates.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Data root (isolated per test).
  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().join("automat");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Build root the CLI uses for `project`.
  pub fn build_root(&self, project: &str) -> PathBuf {
    self.root_path().join("builds").join(project)
  }

  /// Write a file relative to the temp directory and return its path.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write `project` as JSON and store it with `automat project put`.
  pub fn put_project(&self, project: &serde_json::Value) {
    let name = project["name"].as_str().unwrap();
    let file = self.write_file(&format!("{}.json", name), &project.to_string());
    self
      .automat_cmd()
      .args(["project", "put"])
      .arg(&file)
      .assert()
      .success();
  }

  /// Get a pre-configured Command for the automat binary.
  ///
  /// `AUTOMAT_ROOT` points at the isolated data root and `RUST_LOG` is
  /// cleared so log output does not depend on the caller's environment.
  pub fn automat_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("automat");
    cmd.env("AUTOMAT_ROOT", self.root_path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Shell command vector.
pub fn sh(script: &str) -> serde_json::Value {
  serde_json::json!(["/bin/sh", "-c", script])
}

pub fn git_available() -> bool {
  std::process::Command::new("git")
    .arg("--version")
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
  let output = std::process::Command::new("git")
    .args(args)
    .current_dir(dir)
    .env("GIT_AUTHOR_NAME", "test")
    .env("GIT_AUTHOR_EMAIL", "test@example.com")
    .env("GIT_COMMITTER_NAME", "test")
    .env("GIT_COMMITTER_EMAIL", "test@example.com")
    .output()
    .unwrap();
  assert!(output.status.success(), "git {:?} failed", args);
  String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Create a git repository with a single commit containing `files`.
///
/// Returns the commit id.
pub fn init_repo(dir: &Path, files: &[(&str, &str)]) -> String {
  std::fs::create_dir_all(dir).unwrap();
  git(dir, &["init", "-q"]);
  for (name, content) in files {
    std::fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
  }
  git(dir, &["commit", "-q", "-m", "initial"]);
  git(dir, &["rev-parse", "HEAD"])
}
