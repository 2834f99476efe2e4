//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, QuerygenErrorCode};

/// Errors that can occur while discovering and reading source files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Walk error: {message}")]
    Walk { message: String },

    #[error("Invalid ignore pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("No Go source files found in the given inputs")]
    NoInputs,
}

impl QuerygenErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoInputs => error_code::NO_INPUTS,
            _ => error_code::SCAN_ERROR,
        }
    }
}
