//! Descriptor builder errors.
//!
//! Raised on the first structural problem in a query's directives. The
//! caller attributes them to the query constant and drops only that query.

use super::error_code::{self, QuerygenErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("first interpolation of {field} must specify type")]
    FirstOccurrenceRequiresType { field: String },

    #[error("field {field} used with distinct types: {first} and {second}")]
    TypeConflict {
        field: String,
        first: String,
        second: String,
    },

    #[error("cannot automatically format type: {type_name}")]
    UnformattableType { field: String, type_name: String },

    #[error("failed name lookup for type {type_name} of interpolation variable {field}")]
    UnresolvedType { field: String, type_name: String },

    #[error("expected named type after first ':' but found {kind} {name}")]
    NotAType {
        field: String,
        name: String,
        kind: &'static str,
    },
}

impl DescriptorError {
    /// Remediation hint shown alongside the error, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnformattableType { field, type_name } => Some(format!(
                "cannot handle type {type_name} of interpolation variable {field}; \
                 it should be a basic type (int, uint, string) or have a basic type \
                 as its underlying type. HINT: you can specify a custom format \
                 specifier using {{{{fieldName : type : %d}}}} syntax"
            )),
            _ => None,
        }
    }
}

impl QuerygenErrorCode for DescriptorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedType { .. } => error_code::UNRESOLVED_TYPE,
            _ => error_code::MALFORMED_DIRECTIVE,
        }
    }
}
