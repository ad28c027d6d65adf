//! [`Vcs`] implementation that shells out to `git`.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::{Vcs, VcsError};
use crate::execute::OutputSink;

/// Runs the `git` executable found on `PATH`.
#[derive(Debug, Clone)]
pub struct Git {
  program: String,
  output: OutputSink,
}

impl Default for Git {
  fn default() -> Self {
    Self::new(OutputSink::default())
  }
}

impl Git {
  pub fn new(output: OutputSink) -> Self {
    Self {
      program: "git".to_string(),
      output,
    }
  }

  /// Use a specific git binary instead of the one on `PATH`.
  pub fn with_program(mut self, program: impl Into<String>) -> Self {
    self.program = program.into();
    self
  }

  async fn run(&self, op: &'static str, dir: &Path, args: &[&str]) -> Result<(), VcsError> {
    debug!(op, dir = %dir.display(), ?args, "running git");

    let (stdout, stderr) = self.output.stdio().map_err(|source| VcsError::Spawn { op, source })?;
    let status = Command::new(&self.program)
      .args(args)
      .current_dir(dir)
      .stdin(Stdio::null())
      .stdout(stdout)
      .stderr(stderr)
      .status()
      .await
      .map_err(|source| VcsError::Spawn { op, source })?;

    if !status.success() {
      return Err(VcsError::Failed {
        op,
        code: status.code(),
      });
    }
    Ok(())
  }

  /// Whether `refname` names a commit in the working copy.
  async fn resolves(&self, dest: &Path, refname: &str) -> Result<bool, VcsError> {
    let op = "rev-parse";
    let spec = format!("{}^{{commit}}", refname);
    let status = Command::new(&self.program)
      .args(["rev-parse", "--verify", "--quiet", spec.as_str()])
      .current_dir(dest)
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .await
      .map_err(|source| VcsError::Spawn { op, source })?;
    Ok(status.success())
  }
}

impl Vcs for Git {
  async fn clone_repo(&self, url: &str, name: &str, root: &Path) -> Result<(), VcsError> {
    self.run("clone", root, &["clone", "--", url, name]).await
  }

  async fn fetch(&self, dest: &Path) -> Result<(), VcsError> {
    self.run("fetch", dest, &["fetch", "--prune", "origin"]).await
  }

  /// Discard edits to tracked files, then untracked and ignored files.
  async fn clean(&self, dest: &Path) -> Result<(), VcsError> {
    self.run("reset", dest, &["reset", "--hard", "-q"]).await?;
    self.run("clean", dest, &["clean", "-d", "-f", "-x"]).await
  }

  /// A branch name follows the fetched remote branch; anything else is
  /// checked out as given. HEAD is always left detached.
  async fn checkout(&self, dest: &Path, revision: &str) -> Result<(), VcsError> {
    let remote = format!("refs/remotes/origin/{}", revision);
    let target = if self.resolves(dest, &remote).await? {
      remote.as_str()
    } else {
      revision
    };
    self
      .run("checkout", dest, &["checkout", "--force", "--detach", target, "--"])
      .await
  }

  async fn head_revision(&self, dest: &Path) -> Result<String, VcsError> {
    let op = "rev-list";
    debug!(op, dir = %dest.display(), "resolving HEAD");

    let (_, stderr) = self.output.stdio().map_err(|source| VcsError::Spawn { op, source })?;
    let output = Command::new(&self.program)
      .args(["rev-list", "-n", "1", "HEAD"])
      .current_dir(dest)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(stderr)
      .output()
      .await
      .map_err(|source| VcsError::Spawn { op, source })?;

    if !output.status.success() {
      return Err(VcsError::Failed {
        op,
        code: output.status.code(),
      });
    }

    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if revision.is_empty() {
      return Err(VcsError::InvalidHead("rev-list printed nothing".to_string()));
    }
    Ok(revision)
  }
}
