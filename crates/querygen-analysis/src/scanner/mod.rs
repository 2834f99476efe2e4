//! Scanner subsystem: Go source discovery and content hashing.
//!
//! Walks the input paths, honours ignore files and configured globs, and
//! marks generated companion files so later stages only read their preamble.

pub mod hasher;
pub mod types;
pub mod walker;

pub use types::{DiscoveredFile, ScanResult, ScanStats};
pub use walker::Scanner;
