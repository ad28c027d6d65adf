//! Implementation of the `automat build` command.
//!
//! Loads a stored project, runs the pipeline in the project's build root,
//! saves the resulting record as the project's last build and prints it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use automat_lib::execute::{BuildConfig, Builder, OutputSink};
use automat_lib::platform::paths::DataLayout;
use automat_lib::project::ProjectStore;
use automat_lib::record::RecordStore;
use automat_lib::vcs::Git;

use crate::output::{print_json, print_record};

/// Run a build. Returns whether every checkout and step succeeded.
pub fn cmd_build(layout: &DataLayout, name: &str, json: bool, log: Option<PathBuf>) -> Result<bool> {
  let project = ProjectStore::new(layout.projects_dir())
    .load(name)
    .with_context(|| format!("Failed to load project '{}'", name))?;

  // Child output never goes to stdout so `--json` stays parseable.
  let sink = match log {
    Some(path) => OutputSink::File(path),
    None => OutputSink::Stderr,
  };
  let builder = Builder::new(Git::new(sink.clone()), BuildConfig::from_process_env(sink));
  let build_root = layout.build_root(name);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let record = rt
    .block_on(builder.build(&project, &build_root))
    .with_context(|| format!("Build of '{}' could not start", name))?;

  RecordStore::new(layout.records_dir())
    .save(&record)
    .context("Failed to save build record")?;
  info!(project = %name, hash = %record.hash, "build record saved");

  if json {
    print_json(&record)?;
  } else {
    print_record(&record);
  }

  Ok(record.is_success())
}
