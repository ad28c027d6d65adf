//! Build records.
//!
//! A [`BuildRecord`] is created from a project snapshot before anything runs,
//! filled in by the pipeline as each checkout and step completes, and handed
//! back to the caller once the run is over.

pub mod store;
mod types;

pub use store::RecordStore;
pub use types::*;
