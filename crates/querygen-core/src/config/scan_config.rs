//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for source discovery and the worker pool.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Worker threads for parsing and analysis. Default: rayon's choice.
    pub threads: Option<usize>,
    /// Follow symbolic links while walking directories. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Honour `.gitignore` and friends. Default: true.
    pub respect_gitignore: Option<bool>,
    /// Scan `_test.go` files. Default: true.
    pub include_tests: Option<bool>,
    /// Additional glob patterns to skip.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
}

impl ScanConfig {
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }

    pub fn effective_include_tests(&self) -> bool {
        self.include_tests.unwrap_or(true)
    }
}
