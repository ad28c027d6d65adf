//! Bring one component's working copy to a pristine checkout of a revision.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::vcs::{Vcs, VcsError};

#[derive(Debug, Error)]
pub enum CheckoutError {
  #[error("failed to create build root '{path}': {source}")]
  CreateRoot {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("clone of '{url}' failed: {source}")]
  Clone {
    url: String,
    #[source]
    source: VcsError,
  },

  #[error("fetch failed: {0}")]
  Fetch(#[source] VcsError),

  #[error("clean failed: {0}")]
  Clean(#[source] VcsError),

  #[error("checkout of '{revision}' failed: {source}")]
  Checkout {
    revision: String,
    #[source]
    source: VcsError,
  },

  #[error("failed to resolve revision: {0}")]
  Resolve(#[source] VcsError),
}

/// Check out `revision` of `url` into `<build_root>/<name>`.
///
/// Clones when the directory is not yet a working copy, then fetches, removes
/// untracked and ignored files, checks out the revision and returns the
/// commit id HEAD resolved to.
pub async fn checkout_component<V: Vcs>(
  vcs: &V,
  url: &str,
  name: &str,
  revision: &str,
  build_root: &Path,
) -> Result<String, CheckoutError> {
  if !build_root.exists() {
    std::fs::create_dir_all(build_root).map_err(|source| CheckoutError::CreateRoot {
      path: build_root.to_path_buf(),
      source,
    })?;
  }

  let dest = build_root.join(name);
  if !dest.join(".git").exists() {
    debug!(url, name, "cloning component");
    vcs
      .clone_repo(url, name, build_root)
      .await
      .map_err(|source| CheckoutError::Clone {
        url: url.to_string(),
        source,
      })?;
  }

  vcs.fetch(&dest).await.map_err(CheckoutError::Fetch)?;
  vcs.clean(&dest).await.map_err(CheckoutError::Clean)?;
  vcs
    .checkout(&dest, revision)
    .await
    .map_err(|source| CheckoutError::Checkout {
      revision: revision.to_string(),
      source,
    })?;

  let resolved = vcs.head_revision(&dest).await.map_err(CheckoutError::Resolve)?;
  debug!(name, revision, resolved = %resolved, "component checked out");
  Ok(resolved)
}
