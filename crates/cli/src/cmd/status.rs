//! Status command implementation.
//!
//! Displays the last saved build record of a project.

use anyhow::{Context, Result};

use automat_lib::platform::paths::DataLayout;
use automat_lib::record::RecordStore;

use crate::output::{print_info, print_json, print_record};

pub fn cmd_status(layout: &DataLayout, name: &str, json: bool) -> Result<()> {
  let store = RecordStore::new(layout.records_dir());

  let record = match store
    .load_last(name)
    .with_context(|| format!("Failed to load build record for '{}'", name))?
  {
    Some(record) => record,
    None => {
      print_info(&format!("No builds recorded for '{}'. Run 'automat build {}' first.", name, name));
      return Ok(());
    }
  };

  if json {
    print_json(&record)?;
  } else {
    print_record(&record);
  }

  Ok(())
}
