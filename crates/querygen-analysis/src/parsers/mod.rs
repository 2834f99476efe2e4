//! Tree-sitter Go parsing: thread_local parser instances, package clause and
//! import layout extraction.

pub mod error_tolerant;
pub mod go;
pub mod types;

pub use go::{parse_go, read_and_parse, GoFile};
pub use types::{Position, Range};
