//! Host binding: the read-only view of one Go package that folding and
//! descriptor building consult.
//!
//! - `scope`: package-level objects with a universe fallback, and the
//!   `SymbolResolver` capability used for format inference
//! - `definitions`: per-file constant definitions, lowered to owned
//!   expressions and indexed by identifier offset
//! - `context`: `AnalysisContext`, the package handed to every worker
//! - `gomod`: module import path lookup

pub mod context;
pub mod definitions;
pub mod gomod;
pub mod scope;

pub use context::{AnalysisContext, Resolution, SourceUnit};
pub use definitions::{ConstDef, ConstExpr, DefinitionIndex};
pub use scope::{
    universe_lookup, BasicKind, ObjectKind, PackageScope, SymbolResolver, TypeLookup, Underlying,
};
