//! Last-build record storage.
//!
//! ```text
//! {root}/records/
//! └── <project>.json      # Most recent BuildRecord of each project
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use super::types::{BuildRecord, RecordError};
use crate::project::is_valid_project_name;

#[derive(Debug, Clone)]
pub struct RecordStore {
  base_path: PathBuf,
}

impl RecordStore {
  pub fn new(base_path: PathBuf) -> Self {
    Self { base_path }
  }

  fn record_path(&self, name: &str) -> PathBuf {
    self.base_path.join(format!("{}.json", name))
  }

  /// Save a record as the project's most recent build.
  pub fn save(&self, record: &BuildRecord) -> Result<(), RecordError> {
    if !is_valid_project_name(&record.name) {
      return Err(RecordError::InvalidName(record.name.clone()));
    }
    fs::create_dir_all(&self.base_path).map_err(RecordError::CreateDir)?;

    let path = self.record_path(&record.name);
    let temp_path = self.base_path.join(format!("{}.json.tmp", record.name));

    let content = serde_json::to_string_pretty(record).map_err(RecordError::Serialize)?;
    fs::write(&temp_path, &content).map_err(RecordError::Write)?;
    fs::rename(&temp_path, &path).map_err(RecordError::Write)?;

    Ok(())
  }

  /// Load the most recent record of a project.
  ///
  /// Returns `Ok(None)` if the project was never built.
  pub fn load_last(&self, name: &str) -> Result<Option<BuildRecord>, RecordError> {
    if !is_valid_project_name(name) {
      return Err(RecordError::InvalidName(name.to_string()));
    }

    let content = match fs::read_to_string(self.record_path(name)) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(RecordError::Read(e)),
    };

    let record = serde_json::from_str(&content).map_err(RecordError::Parse)?;
    Ok(Some(record))
  }
}
