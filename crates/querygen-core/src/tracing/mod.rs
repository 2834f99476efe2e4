//! Observability for querygen.
//! `tracing` crate with `EnvFilter`, overridable through `QUERYGEN_LOG`.

pub mod setup;

pub use setup::{init_tracing, DEFAULT_LEVEL, LOG_ENV_VAR};
