//! querygen-analysis: the analysis and code generation pipeline.
//!
//! Discovers Go sources, parses them with tree-sitter, folds query
//! constants into their literal text, parses the interpolation directives
//! embedded in that text, builds parameter descriptors and keeps the
//! companion `_query_gen.go` files in sync with them.

pub mod codegen;
pub mod diagnostics;
pub mod host;
pub mod parsers;
pub mod pipeline;
pub mod scanner;
pub mod sync;
pub mod visitor;

pub use diagnostics::{Diagnostic, Severity};
pub use pipeline::{Pipeline, RunOutcome, RunSummary};
