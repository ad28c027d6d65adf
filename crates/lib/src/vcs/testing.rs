//! In-memory [`Vcs`] for driving checkouts without git.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use super::{Vcs, VcsError};

/// Fake VCS that records every call.
///
/// Cloning creates `<root>/<name>/.git` so later checkouts see a working copy.
/// HEAD resolves to the revision registered for the working-copy directory
/// name.
#[derive(Debug, Default)]
pub struct FakeVcs {
  revisions: HashMap<String, String>,
  failing_urls: HashSet<String>,
  rejected_revisions: HashSet<String>,
  calls: Mutex<Vec<String>>,
}

fn dir_name(dest: &Path) -> String {
  dest
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default()
}

impl FakeVcs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Resolve HEAD of working copy `name` to `revision`.
  pub fn with_revision(mut self, name: &str, revision: &str) -> Self {
    self.revisions.insert(name.to_string(), revision.to_string());
    self
  }

  /// Make every clone of `url` fail.
  pub fn failing(mut self, url: &str) -> Self {
    self.failing_urls.insert(url.to_string());
    self
  }

  /// Make checkouts of `revision` fail.
  pub fn rejecting_revision(mut self, revision: &str) -> Self {
    self.rejected_revisions.insert(revision.to_string());
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  fn record(&self, call: String) {
    self.calls.lock().unwrap().push(call);
  }
}

impl Vcs for FakeVcs {
  async fn clone_repo(&self, url: &str, name: &str, root: &Path) -> Result<(), VcsError> {
    self.record(format!("clone {} {}", url, name));
    if self.failing_urls.contains(url) {
      return Err(VcsError::Failed {
        op: "clone",
        code: Some(128),
      });
    }
    std::fs::create_dir_all(root.join(name).join(".git")).map_err(|source| VcsError::Spawn { op: "clone", source })
  }

  async fn fetch(&self, dest: &Path) -> Result<(), VcsError> {
    self.record(format!("fetch {}", dir_name(dest)));
    Ok(())
  }

  async fn clean(&self, dest: &Path) -> Result<(), VcsError> {
    self.record(format!("clean {}", dir_name(dest)));
    Ok(())
  }

  async fn checkout(&self, dest: &Path, revision: &str) -> Result<(), VcsError> {
    self.record(format!("checkout {} {}", dir_name(dest), revision));
    if self.rejected_revisions.contains(revision) {
      return Err(VcsError::Failed {
        op: "checkout",
        code: Some(1),
      });
    }
    Ok(())
  }

  async fn head_revision(&self, dest: &Path) -> Result<String, VcsError> {
    let name = dir_name(dest);
    self.record(format!("head {}", name));
    self
      .revisions
      .get(&name)
      .cloned()
      .ok_or_else(|| VcsError::InvalidHead(format!("no revision registered for '{}'", name)))
  }
}
