//! Run a single build step as a child process.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use super::sink::OutputSink;
use crate::record::BuildStatus;

#[derive(Debug, Error)]
pub enum StepError {
  #[error("step directory '{0}' does not exist")]
  MissingDirectory(PathBuf),

  #[error("failed to open output sink: {0}")]
  Sink(#[source] std::io::Error),

  #[error("failed to launch '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// `code` is `None` when the process was killed by a signal.
  #[error("'{program}' exited with code {code:?}")]
  Exit { program: String, code: Option<i32> },
}

/// Result of running one step. The duration is always measured.
#[derive(Debug)]
pub struct StepOutcome {
  pub status: BuildStatus,
  pub duration: Duration,
  pub error: Option<StepError>,
}

impl StepOutcome {
  fn finish(start: Instant, result: Result<(), StepError>) -> Self {
    let duration = start.elapsed();
    match result {
      Ok(()) => Self {
        status: BuildStatus::Ok,
        duration,
        error: None,
      },
      Err(e) => Self {
        status: BuildStatus::Failed,
        duration,
        error: Some(e),
      },
    }
  }
}

/// Run `program args..` in `directory` with exactly the given `NAME=VALUE`
/// environment.
pub async fn run_step(directory: &Path, env: &[String], program: &str, args: &[String], sink: &OutputSink) -> StepOutcome {
  let start = Instant::now();
  let result = spawn_and_wait(directory, env, program, args, sink).await;
  StepOutcome::finish(start, result)
}

async fn spawn_and_wait(
  directory: &Path,
  env: &[String],
  program: &str,
  args: &[String],
  sink: &OutputSink,
) -> Result<(), StepError> {
  if !directory.is_dir() {
    return Err(StepError::MissingDirectory(directory.to_path_buf()));
  }

  debug!(dir = %directory.display(), program, ?args, "running step command");

  let (stdout, stderr) = sink.stdio().map_err(StepError::Sink)?;
  let mut command = Command::new(program);
  command
    .args(args)
    .current_dir(directory)
    .env_clear()
    .stdin(Stdio::null())
    .stdout(stdout)
    .stderr(stderr);
  for entry in env {
    match entry.split_once('=') {
      Some((name, value)) => command.env(name, value),
      None => command.env(entry, ""),
    };
  }

  let status = command.status().await.map_err(|source| StepError::Spawn {
    program: program.to_string(),
    source,
  })?;

  if !status.success() {
    return Err(StepError::Exit {
      program: program.to_string(),
      code: status.code(),
    });
  }
  Ok(())
}
