//! Scanner types.

use std::path::PathBuf;

use querygen_core::errors::ScanError;
use serde::Serialize;

/// A Go source file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Generated companion file (`*_query_gen.go`, `*_query_gen_test.go`).
    pub is_companion: bool,
}

/// Counters collected while walking the inputs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub files_discovered: usize,
    pub companions: usize,
    pub tests_skipped: usize,
    pub discovery_ms: u64,
}

/// Discovery output. `errors` holds per-entry failures that did not stop
/// the walk.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<DiscoveredFile>,
    pub stats: ScanStats,
    pub errors: Vec<ScanError>,
}
