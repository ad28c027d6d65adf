//! Project definition management.
//!
//! Definitions are JSON files stored under the data root, keyed by project
//! name. `put` validates a definition before storing it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::debug;

use automat_lib::platform::paths::DataLayout;
use automat_lib::project::{Project, ProjectStore};

use crate::output::{print_info, print_json, print_success};

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
  /// Validate and store a project definition from a JSON file
  Put {
    /// Path to the project JSON file
    file: PathBuf,
  },

  /// Print a stored project definition as JSON
  Show {
    /// Project name
    name: String,
  },

  /// List stored project names
  List,

  /// Delete a stored project definition
  Remove {
    /// Project name
    name: String,
  },
}

pub fn cmd_project(layout: &DataLayout, command: ProjectCommand) -> Result<()> {
  let store = ProjectStore::new(layout.projects_dir());
  match command {
    ProjectCommand::Put { file } => cmd_put(&store, &file),
    ProjectCommand::Show { name } => {
      let project = store
        .load(&name)
        .with_context(|| format!("Failed to load project '{}'", name))?;
      print_json(&project)
    }
    ProjectCommand::List => cmd_list(&store),
    ProjectCommand::Remove { name } => {
      store
        .remove(&name)
        .with_context(|| format!("Failed to remove project '{}'", name))?;
      print_success(&format!("Removed project '{}'", name));
      Ok(())
    }
  }
}

fn cmd_put(store: &ProjectStore, file: &Path) -> Result<()> {
  let content =
    std::fs::read_to_string(file).with_context(|| format!("Failed to read project file: {}", file.display()))?;
  let project =
    Project::from_json(&content).with_context(|| format!("Invalid project definition: {}", file.display()))?;

  store
    .save(&project)
    .with_context(|| format!("Failed to store project '{}'", project.name))?;
  debug!(project = %project.name, dir = %store.base_path().display(), "project stored");

  print_success(&format!(
    "Stored project '{}' ({} components, {} steps)",
    project.name,
    project.components.len(),
    project.steps.len()
  ));
  Ok(())
}

fn cmd_list(store: &ProjectStore) -> Result<()> {
  let names = store.list().context("Failed to list projects")?;
  if names.is_empty() {
    print_info("No projects stored. Add one with 'automat project put <FILE>'.");
    return Ok(());
  }
  for name in names {
    println!("{}", name);
  }
  Ok(())
}
