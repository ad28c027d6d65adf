//! automat-lib: Core types and logic for automat
//!
//! This crate provides the pieces of a minimal continuous-integration runner:
//! - `Project`: components to check out and the steps that build them
//! - `Builder`: the pipeline that checks out components and runs steps
//! - `BuildRecord`: per-unit statuses, durations and the build fingerprint
//! - `Vcs`: the version-control operations a checkout needs, backed by git

pub mod consts;
pub mod execute;
pub mod platform;
pub mod project;
pub mod record;
pub mod util;
pub mod vcs;
