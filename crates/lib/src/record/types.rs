use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::project::Project;

/// Outcome of one checkout or step.
///
/// Every unit starts as `NotRun` and moves exactly once to one of the other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
  #[default]
  NotRun,
  Ok,
  Failed,
  Skipped,
}

impl BuildStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      BuildStatus::NotRun => "NOT_RUN",
      BuildStatus::Ok => "OK",
      BuildStatus::Failed => "FAILED",
      BuildStatus::Skipped => "SKIPPED",
    }
  }
}

impl std::fmt::Display for BuildStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRecord {
  #[serde(with = "duration_nanos")]
  pub duration: Duration,
  pub status: BuildStatus,
  pub name: String,
  pub url: String,
  /// Requested revision until the checkout succeeds, then the resolved commit id.
  pub revision: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
  #[serde(with = "duration_nanos")]
  pub duration: Duration,
  pub status: BuildStatus,
  pub directory: String,
  pub command: Vec<String>,
}

/// Result of one pipeline run.
///
/// The shape (component keys, step count and commands) is fixed from the
/// project when the record is created; the pipeline only fills in outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
  pub hash: String,
  #[serde(with = "duration_nanos")]
  pub duration: Duration,
  pub name: String,
  /// Unix timestamp (seconds) at which the run started.
  pub started_at: u64,
  pub components: BTreeMap<String, CheckoutRecord>,
  pub steps: Vec<StepRecord>,
}

impl BuildRecord {
  pub fn new(project: &Project, started_at: u64) -> Self {
    let components = project
      .components
      .iter()
      .map(|(key, component)| {
        (
          key.clone(),
          CheckoutRecord {
            duration: Duration::ZERO,
            status: BuildStatus::NotRun,
            name: component.local_name(key).to_string(),
            url: component.url.clone(),
            revision: component.revision.clone(),
          },
        )
      })
      .collect();

    let steps = project
      .steps
      .iter()
      .map(|step| StepRecord {
        duration: Duration::ZERO,
        status: BuildStatus::NotRun,
        directory: step.directory.clone(),
        command: step.command.clone(),
      })
      .collect();

    Self {
      hash: String::new(),
      duration: Duration::ZERO,
      name: project.name.clone(),
      started_at,
      components,
      steps,
    }
  }

  pub fn set_revision(&mut self, component: &str, revision: &str, duration: Duration, status: BuildStatus) {
    if let Some(record) = self.components.get_mut(component) {
      record.revision = revision.to_string();
      record.duration = duration;
      record.status = status;
    }
  }

  pub fn set_status(&mut self, index: usize, status: BuildStatus, duration: Duration) {
    if let Some(step) = self.steps.get_mut(index) {
      step.status = status;
      step.duration = duration;
    }
  }

  /// Returns true if every checkout and every step finished `OK`.
  pub fn is_success(&self) -> bool {
    self.components.values().all(|c| c.status == BuildStatus::Ok)
      && self.steps.iter().all(|s| s.status == BuildStatus::Ok)
  }

  /// Number of checkouts and steps in the given state.
  pub fn count(&self, status: BuildStatus) -> usize {
    self.components.values().filter(|c| c.status == status).count()
      + self.steps.iter().filter(|s| s.status == status).count()
  }
}

#[derive(Debug, Error)]
pub enum RecordError {
  #[error("invalid project name: {0}")]
  InvalidName(String),

  #[error("failed to create record directory: {0}")]
  CreateDir(#[source] std::io::Error),

  #[error("failed to read build record: {0}")]
  Read(#[source] std::io::Error),

  #[error("failed to write build record: {0}")]
  Write(#[source] std::io::Error),

  #[error("failed to parse build record: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize build record: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Durations travel as integer nanoseconds.
mod duration_nanos {
  use std::time::Duration;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_nanos)
  }
}
