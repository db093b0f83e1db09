//! Command implementations for the ntpatch CLI

pub mod backup;
pub mod backups;
pub mod completions;
pub mod helpers;
pub mod install;
pub mod launch;
pub mod restore;
pub mod version;
