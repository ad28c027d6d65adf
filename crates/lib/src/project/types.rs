use std::collections::BTreeMap;
use std::path::{Component as PathComponent, Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for project definitions and their storage.
#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("invalid project name '{0}': only letters, digits, '-' and '_' are allowed")]
  InvalidName(String),

  #[error("component '{key}': invalid local name '{name}'")]
  InvalidComponentName { key: String, name: String },

  #[error("component '{key}': local name '{name}' is already used by component '{other}'")]
  DuplicateComponentName { key: String, name: String, other: String },

  #[error("component '{key}': missing {field}")]
  MissingComponentField { key: String, field: &'static str },

  #[error("component '{key}': {field} must not start with '-'")]
  OptionLikeComponentField { key: String, field: &'static str },

  #[error("step {index}: command is empty")]
  EmptyCommand { index: usize },

  #[error("step {index}: directory '{directory}' must be relative to the build root")]
  InvalidStepDirectory { index: usize, directory: String },

  #[error("project not found: {0}")]
  NotFound(String),

  #[error("project file '{file}' declares name '{name}'")]
  NameMismatch { file: String, name: String },

  #[error("failed to create project directory: {0}")]
  CreateDir(#[source] std::io::Error),

  #[error("failed to read project: {0}")]
  Read(#[source] std::io::Error),

  #[error("failed to write project: {0}")]
  Write(#[source] std::io::Error),

  #[error("failed to parse project: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize project: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// One source dependency checked out into the build root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Component {
  /// Working-copy directory name below the build root.
  #[serde(default)]
  pub name: String,
  pub url: String,
  pub revision: String,
}

impl Component {
  /// Directory name used for the working copy, falling back to the component key.
  pub fn local_name<'a>(&'a self, key: &'a str) -> &'a str {
    if self.name.is_empty() { key } else { &self.name }
  }
}

/// One command executed in a directory of the build root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildStep {
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub directory: String,
  pub command: Vec<String>,
  #[serde(default)]
  pub env: BTreeMap<String, String>,
}

/// Declarative definition of a build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
  pub name: String,
  #[serde(default)]
  pub components: BTreeMap<String, Component>,
  #[serde(default)]
  pub steps: Vec<BuildStep>,
  #[serde(default)]
  pub env: BTreeMap<String, String>,
}

impl Project {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Default::default()
    }
  }

  pub fn add_component(&mut self, name: &str, url: &str, revision: &str) {
    self.components.insert(
      name.to_string(),
      Component {
        name: name.to_string(),
        url: url.to_string(),
        revision: revision.to_string(),
      },
    );
  }

  pub fn add_step(&mut self, description: &str, directory: &str, command: &[&str]) {
    self.steps.push(BuildStep {
      description: description.to_string(),
      directory: directory.to_string(),
      command: command.iter().map(|s| s.to_string()).collect(),
      env: BTreeMap::new(),
    });
  }

  /// Parse a project from JSON and validate it.
  pub fn from_json(content: &str) -> Result<Self, ProjectError> {
    let project: Project = serde_json::from_str(content).map_err(ProjectError::Parse)?;
    project.validate()?;
    Ok(project)
  }

  /// Check every invariant a project must satisfy before it can be built.
  pub fn validate(&self) -> Result<(), ProjectError> {
    if !is_valid_project_name(&self.name) {
      return Err(ProjectError::InvalidName(self.name.clone()));
    }

    let mut local_names: BTreeMap<&str, &str> = BTreeMap::new();
    for (key, component) in &self.components {
      let local = component.local_name(key);
      if !is_safe_segment(local) {
        return Err(ProjectError::InvalidComponentName {
          key: key.clone(),
          name: local.to_string(),
        });
      }
      if let Some(other) = local_names.insert(local, key) {
        return Err(ProjectError::DuplicateComponentName {
          key: key.clone(),
          name: local.to_string(),
          other: other.to_string(),
        });
      }
      if component.url.is_empty() {
        return Err(ProjectError::MissingComponentField { key: key.clone(), field: "url" });
      }
      if component.revision.is_empty() {
        return Err(ProjectError::MissingComponentField {
          key: key.clone(),
          field: "revision",
        });
      }
      // Both values are passed to git as positional arguments.
      for (field, value) in [("url", &component.url), ("revision", &component.revision)] {
        if value.starts_with('-') {
          return Err(ProjectError::OptionLikeComponentField { key: key.clone(), field });
        }
      }
    }

    for (index, step) in self.steps.iter().enumerate() {
      match step.command.first() {
        Some(program) if !program.is_empty() => {}
        _ => return Err(ProjectError::EmptyCommand { index }),
      }
      if !is_confined_directory(&step.directory) {
        return Err(ProjectError::InvalidStepDirectory {
          index,
          directory: step.directory.clone(),
        });
      }
    }

    Ok(())
  }
}

/// Project names double as file names, so they are restricted to `[-A-Za-z0-9_]+`.
pub fn is_valid_project_name(name: &str) -> bool {
  !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_safe_segment(name: &str) -> bool {
  !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

fn is_confined_directory(directory: &str) -> bool {
  let path = Path::new(directory);
  !directory.contains('\0')
    && path
      .components()
      .all(|c| matches!(c, PathComponent::Normal(_) | PathComponent::CurDir))
}
