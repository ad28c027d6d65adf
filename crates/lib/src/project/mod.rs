//! Project definitions.
//!
//! A project names the source components to check out, the ordered build
//! steps to run against them, and the environment the steps see.
//!
//! # Submodules
//!
//! - [`store`] - File-backed persistence keyed by project name

pub mod store;
mod types;

pub use store::ProjectStore;
pub use types::*;
