//! Destinations for child-process output.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

/// Where the stdout and stderr of git and build commands go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputSink {
  /// Share the invoking process's streams.
  #[default]
  Inherit,
  /// Send both streams to the invoking process's stderr, keeping stdout clean.
  Stderr,
  /// Drop all output.
  Discard,
  /// Append both streams to a log file, creating it if needed.
  File(PathBuf),
}

impl OutputSink {
  /// Open a fresh `(stdout, stderr)` pair for one child process.
  pub fn stdio(&self) -> io::Result<(Stdio, Stdio)> {
    match self {
      OutputSink::Inherit => Ok((Stdio::inherit(), Stdio::inherit())),
      OutputSink::Stderr => Ok((Stdio::from(io::stderr()), Stdio::from(io::stderr()))),
      OutputSink::Discard => Ok((Stdio::null(), Stdio::null())),
      OutputSink::File(path) => {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let err = file.try_clone()?;
        Ok((Stdio::from(file), Stdio::from(err)))
      }
    }
  }
}
