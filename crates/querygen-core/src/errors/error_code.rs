//! QuerygenErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string,
/// used by diagnostics output and the JSON reporter.
pub trait QuerygenErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const NO_INPUTS: &str = "NO_INPUTS";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const PARTIAL_PARSE: &str = "PARTIAL_PARSE";
pub const FOLD_ERROR: &str = "FOLD_ERROR";
pub const CYCLIC_CONSTANT: &str = "CYCLIC_CONSTANT";
pub const MALFORMED_DIRECTIVE: &str = "MALFORMED_DIRECTIVE";
pub const UNRESOLVED_TYPE: &str = "UNRESOLVED_TYPE";
pub const SYNC_ERROR: &str = "SYNC_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
