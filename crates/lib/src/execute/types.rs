//! Error and configuration types for the build pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use super::sink::OutputSink;
use crate::project::ProjectError;

/// Errors that abort a build before a record can be produced.
///
/// Checkout and step failures are not errors at this level; they are
/// reported through the statuses of the returned record.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The project failed validation; nothing was started.
  #[error("invalid project: {0}")]
  InvalidProject(#[from] ProjectError),

  #[error("failed to create build root '{path}': {source}")]
  CreateBuildRoot {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Configuration for a [`Builder`](super::Builder).
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
  /// Environment every step starts from before project and step
  /// declarations are applied.
  pub base_env: BTreeMap<String, String>,

  /// Destination of step output.
  pub output: OutputSink,
}

impl BuildConfig {
  /// Configuration whose base environment is a snapshot of the current
  /// process environment. Variables that are not valid UTF-8 are left out.
  pub fn from_process_env(output: OutputSink) -> Self {
    let base_env = std::env::vars_os()
      .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
      .collect();
    Self { base_env, output }
  }
}
