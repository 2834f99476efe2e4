//! Code generation configuration.

use serde::{Deserialize, Serialize};

/// Import path of the runtime package that defines the `QueryParams` contract.
pub const DEFAULT_RUNTIME_IMPORT_PATH: &str = "github.com/sourcegraph/querygen/lib/interpolate";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodegenConfig {
    /// Runtime-contract package imported by generated files. Generated code
    /// qualifies it by the name the go tool assumes for the path: the last
    /// segment, skipping a `/vN` major-version suffix, cut at the first `.`
    /// or `-`. The package clause must match that name.
    pub runtime_import_path: Option<String>,
}

impl CodegenConfig {
    pub fn effective_runtime_import_path(&self) -> &str {
        self.runtime_import_path
            .as_deref()
            .unwrap_or(DEFAULT_RUNTIME_IMPORT_PATH)
    }
}
