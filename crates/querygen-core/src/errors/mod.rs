//! Error handling for querygen.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod descriptor_error;
pub mod error_code;
pub mod fold_error;
pub mod parse_error;
pub mod pipeline_error;
pub mod scan_error;
pub mod sync_error;

pub use config_error::ConfigError;
pub use descriptor_error::DescriptorError;
pub use error_code::QuerygenErrorCode;
pub use fold_error::FoldError;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use scan_error::ScanError;
pub use sync_error::SyncError;
