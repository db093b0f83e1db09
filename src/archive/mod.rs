//! Zip archive reading and writing
//!
//! Overlays and snapshots share one format: a deflated zip whose entry
//! names are paths relative to the directory they were taken from, always
//! separated by `/`.

mod reader;
mod writer;

use std::path::{Component, Path};

pub use reader::{extract_archive, list_files};
pub use writer::{ArchiveEntry, is_staging_name, write_archive};

/// Build the archive entry name for a path relative to the archive root
pub fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
