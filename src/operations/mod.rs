//! Operations coordinating the core components
//!
//! - InstallOperation: validate, back up, patch, finalize, write the manifest
//! - RestoreOperation: confirm and roll back to the newest snapshot

pub mod install;
pub mod restore;

pub use install::{InstallOperation, InstallOptions, InstallSummary};
pub use restore::RestoreOperation;
