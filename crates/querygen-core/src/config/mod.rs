//! Configuration system for querygen.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod codegen_config;
pub mod querygen_config;
pub mod scan_config;

pub use codegen_config::CodegenConfig;
pub use querygen_config::{CliOverrides, QuerygenConfig};
pub use scan_config::ScanConfig;
