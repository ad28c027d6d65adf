//! Build pipeline.
//!
//! A build runs in two phases against a build root:
//! - every component is checked out, in key order, and each outcome is
//!   recorded independently
//! - steps run in declaration order; once a checkout or a step has failed,
//!   every remaining step is marked skipped without being run
//!
//! The fingerprint covers the component identities and the declared steps,
//! never their outcomes, so a failed run hashes the same as a successful one.

pub mod checkout;
pub mod env;
pub mod sink;
pub mod step;
pub mod types;

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::project::Project;
use crate::record::{BuildRecord, BuildStatus};
use crate::util::hash::Fingerprint;
use crate::vcs::Vcs;

pub use checkout::{CheckoutError, checkout_component};
pub use env::resolve_environment;
pub use sink::OutputSink;
pub use step::{StepError, StepOutcome, run_step};
pub use types::{BuildConfig, BuildError};

/// Runs project builds with one VCS and one configuration.
#[derive(Debug)]
pub struct Builder<V> {
  vcs: V,
  config: BuildConfig,
}

impl<V: Vcs> Builder<V> {
  pub fn new(vcs: V, config: BuildConfig) -> Self {
    Self { vcs, config }
  }

  pub fn vcs(&self) -> &V {
    &self.vcs
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Build `project` in `build_root`.
  ///
  /// Returns an error only when the build could not start: the project is
  /// invalid or the build root cannot be created. Every other failure is
  /// reported through the statuses of the returned record.
  pub async fn build(&self, project: &Project, build_root: &Path) -> Result<BuildRecord, BuildError> {
    project.validate()?;

    let start = Instant::now();
    let started_at = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_secs())
      .unwrap_or(0);

    info!(project = %project.name, root = %build_root.display(), "build started");

    if !build_root.exists() {
      std::fs::create_dir_all(build_root).map_err(|source| BuildError::CreateBuildRoot {
        path: build_root.to_path_buf(),
        source,
      })?;
    }

    let mut record = BuildRecord::new(project, started_at);
    let mut fingerprint = Fingerprint::new();
    let mut failed = false;

    fingerprint.components_header();
    for (key, component) in &project.components {
      let name = component.local_name(key);
      let checkout_start = Instant::now();
      let result = checkout_component(&self.vcs, &component.url, name, &component.revision, build_root).await;
      let elapsed = checkout_start.elapsed();

      let revision = match result {
        Ok(resolved) => {
          record.set_revision(key, &resolved, elapsed, BuildStatus::Ok);
          resolved
        }
        Err(e) => {
          warn!(project = %project.name, component = %key, error = %e, "checkout failed");
          record.set_revision(key, &component.revision, elapsed, BuildStatus::Failed);
          failed = true;
          component.revision.clone()
        }
      };
      fingerprint.checkout(&component.url, name, &revision);
    }

    fingerprint.steps_header();
    for (index, step) in project.steps.iter().enumerate() {
      if failed {
        debug!(project = %project.name, step = index, "skipping step");
        record.set_status(index, BuildStatus::Skipped, Duration::ZERO);
      } else {
        let env = resolve_environment(build_root, &self.config.base_env, &project.env, &step.env);
        let directory = build_root.join(&step.directory);
        let (program, args) = match step.command.split_first() {
          Some((program, args)) => (program.as_str(), args),
          None => ("", &[][..]),
        };

        info!(project = %project.name, step = index, description = %step.description, "running step");
        let outcome = run_step(&directory, &env, program, args, &self.config.output).await;
        if let Some(e) = &outcome.error {
          warn!(project = %project.name, step = index, error = %e, "step failed");
          failed = true;
        }
        record.set_status(index, outcome.status, outcome.duration);
      }
      fingerprint.step(&step.directory, &step.command);
    }

    record.hash = fingerprint.finish().0;
    record.duration = start.elapsed();

    info!(
      project = %project.name,
      hash = %record.hash,
      success = record.is_success(),
      duration_ms = record.duration.as_millis() as u64,
      "build finished"
    );

    Ok(record)
  }
}
