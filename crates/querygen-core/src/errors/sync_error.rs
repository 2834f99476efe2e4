//! Companion file synchronization errors.

use std::path::PathBuf;

use super::error_code::{self, QuerygenErrorCode};

/// File-system failures while creating, rewriting or deleting a companion
/// file. Each one is local to its file.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to update {path}: {source}")]
    Update {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl QuerygenErrorCode for SyncError {
    fn error_code(&self) -> &'static str {
        error_code::SYNC_ERROR
    }
}
