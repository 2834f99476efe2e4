//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, QuerygenErrorCode};

/// Errors that can occur while parsing a Go source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to load Go grammar: {message}")]
    GrammarNotLoaded { message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Missing package clause in {path}")]
    MissingPackageClause { path: PathBuf },
}

impl QuerygenErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
