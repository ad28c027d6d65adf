use std::path::{Path, PathBuf};

use crate::consts::{APP_NAME, ROOT_ENV_VAR};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  std::env::var_os("USERPROFILE").map(PathBuf::from).unwrap_or_default()
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default()
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  std::env::var_os("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(home_dir)
    .join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Returns the data root holding projects, build roots and records.
///
/// `AUTOMAT_ROOT` takes precedence over the platform data directory.
pub fn root_dir() -> PathBuf {
  if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
    return PathBuf::from(path);
  }
  data_dir()
}

/// Directory layout below a data root.
///
/// ```text
/// {root}/
/// ├── projects/<name>.json   # Project definitions
/// ├── builds/<name>/         # Build root of each project
/// └── records/<name>.json    # Last build record of each project
/// ```
#[derive(Debug, Clone)]
pub struct DataLayout {
  root: PathBuf,
}

impl DataLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Layout rooted at [`root_dir`].
  pub fn current() -> Self {
    Self::new(root_dir())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn projects_dir(&self) -> PathBuf {
    self.root.join("projects")
  }

  pub fn builds_dir(&self) -> PathBuf {
    self.root.join("builds")
  }

  /// The exclusive build root of one project.
  pub fn build_root(&self, project: &str) -> PathBuf {
    self.builds_dir().join(project)
  }

  pub fn records_dir(&self) -> PathBuf {
    self.root.join("records")
  }
}
