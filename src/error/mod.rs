//! Error types and handling for ntpatch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Variants are grouped by the stage that raises them:
//! - precondition failures (target and resource validation)
//! - archive, snapshot and overlay failures
//! - finalizer failures
//! - restore failures
//! - configuration, prompt and launch failures

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ntpatch operations
#[derive(Error, Diagnostic, Debug)]
pub enum PatchError {
    // Precondition errors
    #[error("Target directory not found: {path}")]
    #[diagnostic(
        code(ntpatch::target::missing),
        help("Pass the installation root with --target or run from inside it")
    )]
    MissingPath { path: String },

    #[error("Target is not a directory: {path}")]
    #[diagnostic(code(ntpatch::target::not_a_directory))]
    NotADirectory { path: String },

    #[error("The selected path must contain '{marker}': {path}")]
    #[diagnostic(
        code(ntpatch::target::marker_not_found),
        help("Select the installation folder itself; its name is checked case-sensitively")
    )]
    MarkerNotFound { path: String, marker: String },

    #[error("Required asset not found in resources: {path}")]
    #[diagnostic(
        code(ntpatch::resources::asset_missing),
        help("Point --resources at the directory holding the patch archives")
    )]
    AssetMissing { path: String },

    // Overlay errors
    #[error("Overlay archive does not exist: {path}")]
    #[diagnostic(code(ntpatch::overlay::missing))]
    OverlayMissing { path: String },

    #[error("Failed to extract overlay {path}: {reason}")]
    #[diagnostic(code(ntpatch::overlay::failed))]
    OverlayFailed { path: String, reason: String },

    // Archive errors
    #[error("Failed to write archive {path}: {reason}")]
    #[diagnostic(code(ntpatch::archive::write_failed))]
    ArchiveWriteFailed { path: String, reason: String },

    #[error("Archive {archive} contains an entry outside the target: {entry}")]
    #[diagnostic(code(ntpatch::archive::unsafe_entry))]
    UnsafeArchiveEntry { archive: String, entry: String },

    #[error("Archive is corrupt or unreadable: {path}: {reason}")]
    #[diagnostic(code(ntpatch::archive::corrupt))]
    CorruptArchive { path: String, reason: String },

    // Finalizer errors
    #[error("Missing {path} in extracted files")]
    #[diagnostic(
        code(ntpatch::finalizer::missing),
        help("The finalize script is shipped inside the first overlay; check that it was applied")
    )]
    ScriptMissing { path: String },

    #[error("Failed to run {path}: {reason}")]
    #[diagnostic(code(ntpatch::finalizer::failed))]
    ScriptFailed { path: String, reason: String },

    #[error("{script} returned with code {code}")]
    #[diagnostic(code(ntpatch::finalizer::non_zero_exit), severity(Warning))]
    ScriptNonZeroExit { script: String, code: i32 },

    // Restore errors
    #[error("No backup files found in {path}")]
    #[diagnostic(
        code(ntpatch::restore::no_backup),
        help("Backups are created by 'ntpatch backup' or by confirming the backup during install")
    )]
    NoBackupFound { path: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(ntpatch::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(ntpatch::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(ntpatch::config::invalid))]
    ConfigInvalid { message: String },

    // Front-end collaborators
    #[error("Failed to launch {target}: {reason}")]
    #[diagnostic(code(ntpatch::launch::failed))]
    LaunchFailed { target: String, reason: String },

    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(ntpatch::ui::prompt_failed),
        help("Run with --yes or pass explicit flags when no terminal is attached")
    )]
    PromptFailed { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(ntpatch::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(ntpatch::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(ntpatch::fs::io_error))]
    IoError { message: String },
}

impl PatchError {
    pub fn read_failed(path: &Path, err: impl std::fmt::Display) -> Self {
        PatchError::FileReadFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn write_failed(path: &Path, err: impl std::fmt::Display) -> Self {
        PatchError::FileWriteFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn corrupt(path: &Path, err: impl std::fmt::Display) -> Self {
        PatchError::CorruptArchive {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PatchError {
    fn from(err: std::io::Error) -> Self {
        PatchError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for PatchError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        PatchError::FileReadFailed {
            path,
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for PatchError {
    fn from(err: zip::result::ZipError) -> Self {
        PatchError::CorruptArchive {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PatchError {
    fn from(err: serde_yaml::Error) -> Self {
        PatchError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PatchError {
    fn from(err: serde_json::Error) -> Self {
        PatchError::IoError {
            message: format!("Failed to serialize JSON: {err}"),
        }
    }
}

impl From<inquire::InquireError> for PatchError {
    fn from(err: inquire::InquireError) -> Self {
        PatchError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PatchError>;
