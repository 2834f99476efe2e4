//! Constant folding outcomes other than a folded string.
//!
//! None of these abort a run: every variant means "this expression is not a
//! compile-time-known template" and the query is skipped.

use super::error_code::{self, QuerygenErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FoldError {
    #[error("unsupported expression kind: {kind}")]
    Unsupported { kind: String },

    #[error("identifier {name} does not resolve to a declaration")]
    Unresolved { name: String },

    #[error("identifier {name} is not a constant with a value")]
    NotConstant { name: String },

    #[error("cyclic dependency in constant expression at {name}")]
    Cyclic { name: String },

    #[error("invalid string literal: {message}")]
    InvalidLiteral { message: String },
}

impl FoldError {
    /// True when folding stopped because of a reference cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::Cyclic { .. })
    }
}

impl QuerygenErrorCode for FoldError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cyclic { .. } => error_code::CYCLIC_CONSTANT,
            _ => error_code::FOLD_ERROR,
        }
    }
}
