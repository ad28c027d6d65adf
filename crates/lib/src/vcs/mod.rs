//! Version-control collaborator.
//!
//! The pipeline only needs a handful of operations on a working copy; the
//! [`Vcs`] trait names them and [`git::Git`] implements them by running the
//! `git` executable.

pub mod git;

#[cfg(test)]
pub mod testing;

use std::future::Future;
use std::path::Path;

use thiserror::Error;

pub use git::Git;

#[derive(Debug, Error)]
pub enum VcsError {
  /// The VCS tool could not be started.
  #[error("failed to run {op}: {source}")]
  Spawn {
    op: &'static str,
    #[source]
    source: std::io::Error,
  },

  /// The VCS tool ran and reported failure.
  #[error("{op} failed with exit code {code:?}")]
  Failed { op: &'static str, code: Option<i32> },

  /// HEAD could not be turned into a revision id.
  #[error("could not resolve HEAD: {0}")]
  InvalidHead(String),
}

/// Operations on a local working copy.
///
/// `dest` is always the working-copy directory itself; `clone_repo` creates
/// `<root>/<name>`.
pub trait Vcs {
  fn clone_repo(&self, url: &str, name: &str, root: &Path) -> impl Future<Output = Result<(), VcsError>> + Send;

  fn fetch(&self, dest: &Path) -> impl Future<Output = Result<(), VcsError>> + Send;

  /// Remove untracked and ignored files.
  fn clean(&self, dest: &Path) -> impl Future<Output = Result<(), VcsError>> + Send;

  fn checkout(&self, dest: &Path, revision: &str) -> impl Future<Output = Result<(), VcsError>> + Send;

  /// Immutable id of the commit currently checked out.
  fn head_revision(&self, dest: &Path) -> impl Future<Output = Result<String, VcsError>> + Send;
}
