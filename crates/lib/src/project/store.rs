//! File-backed project storage.
//!
//! # Storage Layout
//!
//! ```text
//! {root}/projects/
//! └── <name>.json         # One Project per file, keyed by name
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::types::{Project, ProjectError, is_valid_project_name};

/// Reads and writes project definitions.
///
/// Writes go to a temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct ProjectStore {
  base_path: PathBuf,
}

impl ProjectStore {
  pub fn new(base_path: PathBuf) -> Self {
    Self { base_path }
  }

  pub fn base_path(&self) -> &PathBuf {
    &self.base_path
  }

  fn project_path(&self, name: &str) -> PathBuf {
    self.base_path.join(format!("{}.json", name))
  }

  fn ensure_dir(&self) -> Result<(), ProjectError> {
    fs::create_dir_all(&self.base_path).map_err(ProjectError::CreateDir)
  }

  /// Load and validate a project by name.
  ///
  /// The name stored in the file must match the file name.
  pub fn load(&self, name: &str) -> Result<Project, ProjectError> {
    if !is_valid_project_name(name) {
      return Err(ProjectError::InvalidName(name.to_string()));
    }

    let content = fs::read_to_string(self.project_path(name)).map_err(|e| {
      if e.kind() == io::ErrorKind::NotFound {
        ProjectError::NotFound(name.to_string())
      } else {
        ProjectError::Read(e)
      }
    })?;

    let project = Project::from_json(&content)?;
    if project.name != name {
      return Err(ProjectError::NameMismatch {
        file: name.to_string(),
        name: project.name,
      });
    }

    Ok(project)
  }

  /// Validate and save a project under its own name, replacing any previous definition.
  pub fn save(&self, project: &Project) -> Result<(), ProjectError> {
    project.validate()?;
    self.ensure_dir()?;

    let path = self.project_path(&project.name);
    let temp_path = self.base_path.join(format!("{}.json.tmp", project.name));

    let content = serde_json::to_string_pretty(project).map_err(ProjectError::Serialize)?;
    fs::write(&temp_path, &content).map_err(ProjectError::Write)?;
    fs::rename(&temp_path, &path).map_err(ProjectError::Write)?;

    debug!(project = %project.name, path = %path.display(), "project saved");
    Ok(())
  }

  /// Names of all stored projects, sorted.
  ///
  /// Files that are not `<valid-name>.json` are ignored.
  pub fn list(&self) -> Result<Vec<String>, ProjectError> {
    let entries = match fs::read_dir(&self.base_path) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(ProjectError::Read(e)),
    };

    let mut names = Vec::new();
    for entry in entries {
      let entry = entry.map_err(ProjectError::Read)?;
      let path = entry.path();
      if !path.is_file() {
        continue;
      }
      let Some(stem) = path
        .extension()
        .filter(|ext| *ext == "json")
        .and_then(|_| path.file_stem())
        .and_then(|s| s.to_str())
      else {
        continue;
      };
      if is_valid_project_name(stem) {
        names.push(stem.to_string());
      } else {
        warn!(path = %path.display(), "ignoring file with invalid project name");
      }
    }

    names.sort();
    Ok(names)
  }

  /// Delete a project definition.
  pub fn remove(&self, name: &str) -> Result<(), ProjectError> {
    if !is_valid_project_name(name) {
      return Err(ProjectError::InvalidName(name.to_string()));
    }

    fs::remove_file(self.project_path(name)).map_err(|e| {
      if e.kind() == io::ErrorKind::NotFound {
        ProjectError::NotFound(name.to_string())
      } else {
        ProjectError::Write(e)
      }
    })?;

    debug!(project = %name, "project removed");
    Ok(())
  }
}
