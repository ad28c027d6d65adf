mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use automat_lib::platform::paths::DataLayout;

use cmd::{ProjectCommand, cmd_build, cmd_info, cmd_project, cmd_status};

/// automat - minimal continuous-integration build runner
#[derive(Parser)]
#[command(name = "automat")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Data directory for projects, build roots and records (overrides AUTOMAT_ROOT)
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Manage stored project definitions
  Project {
    #[command(subcommand)]
    command: ProjectCommand,
  },

  /// Check out a project's components and run its build steps
  Build {
    /// Project name
    name: String,

    /// Print the build record as JSON
    #[arg(long)]
    json: bool,

    /// Append git and step output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
  },

  /// Show the last build record of a project
  Status {
    /// Project name
    name: String,

    /// Print the build record as JSON
    #[arg(long)]
    json: bool,
  },

  /// Show version and data paths
  Info,
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let layout = match cli.root {
    Some(root) => DataLayout::new(root),
    None => DataLayout::current(),
  };

  match cli.command {
    Commands::Project { command } => cmd_project(&layout, command)?,
    Commands::Build { name, json, log } => {
      if !cmd_build(&layout, &name, json, log)? {
        return Ok(ExitCode::FAILURE);
      }
    }
    Commands::Status { name, json } => cmd_status(&layout, &name, json)?,
    Commands::Info => cmd_info(&layout),
  }

  Ok(ExitCode::SUCCESS)
}
