//! Shared utilities.
//!
//! Common utilities used across the crate including hashing, variable
//! expansion and test helpers.

pub mod expand;
pub mod hash;

#[cfg(test)]
pub mod testutil;
