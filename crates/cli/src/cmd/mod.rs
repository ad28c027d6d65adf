mod build;
mod info;
mod project;
mod status;

pub use build::cmd_build;
pub use info::cmd_info;
pub use project::{ProjectCommand, cmd_project};
pub use status::cmd_status;
