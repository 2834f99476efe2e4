//! querygen-core: shared foundations for the querygen code generator.
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable error code
//! - Config: TOML-based, layered resolution (CLI > env > project > defaults)
//! - Tracing: `tracing-subscriber` setup driven by `QUERYGEN_LOG`
//! - Types: collection aliases used across the workspace

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::QuerygenConfig;
pub use errors::{PipelineError, PipelineResult, QuerygenErrorCode};
