//! Build fingerprinting.
//!
//! This module provides:
//! - `ContentHash`: A full 64-character SHA-256 hash
//! - `Fingerprint`: The running hash over a build's declared inputs
//! - `hash_bytes()`: Arbitrary byte hashing

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A full 64-character SHA256 hash.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Running hash over the logical inputs of a build.
///
/// The byte stream is:
///
/// ```text
/// Components:
/// <url> <name> <revision>\n      one line per component, in name order
/// Steps:
/// <directory><i>: <arg>\n...\n   one block per step, in declaration order
/// ```
///
/// Environment variables and execution outcomes are not part of the stream,
/// so the fingerprint identifies the declared build whether or not it ran.
pub struct Fingerprint {
  hasher: Sha256,
}

impl Fingerprint {
  pub fn new() -> Self {
    Self { hasher: Sha256::new() }
  }

  pub fn components_header(&mut self) {
    self.hasher.update(b"Components:\n");
  }

  pub fn checkout(&mut self, url: &str, name: &str, revision: &str) {
    self.hasher.update(format!("{} {} {}\n", url, name, revision).as_bytes());
  }

  pub fn steps_header(&mut self) {
    self.hasher.update(b"Steps:\n");
  }

  pub fn step(&mut self, directory: &str, command: &[String]) {
    self.hasher.update(directory.as_bytes());
    for (i, arg) in command.iter().enumerate() {
      self.hasher.update(format!("{}: {}\n", i, arg).as_bytes());
    }
    self.hasher.update(b"\n");
  }

  pub fn finish(self) -> ContentHash {
    ContentHash(hex::encode(self.hasher.finalize()))
  }
}

impl Default for Fingerprint {
  fn default() -> Self {
    Self::new()
  }
}

/// Hash arbitrary bytes.
///
/// Returns the full 64-character SHA256 hash.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(hex::encode(hasher.finalize()))
}
