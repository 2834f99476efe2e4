//! Companion file synchronization.

pub mod engine;
pub mod naming;

pub use engine::{sync_all, CompanionArtifact, SyncAction, SyncSummary};
pub use naming::{companion_path, is_companion_path};
