//! Archive creation
//!
//! Archives are staged in a temporary file next to their destination and
//! only persisted under the final name once the central directory has been
//! written, so a failed write never leaves a half-finished archive behind.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{PatchError, Result};
use crate::ui::ProgressReporter;

/// A file to add to an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// File on disk
    pub source: PathBuf,
    /// Entry name inside the archive (relative, `/`-separated)
    pub name: String,
}

const STAGING_PREFIX: &str = ".ntpatch-";
const STAGING_SUFFIX: &str = ".partial";

/// Whether a file name belongs to an archive still being staged
pub fn is_staging_name(name: &str) -> bool {
    name.starts_with(STAGING_PREFIX) && name.ends_with(STAGING_SUFFIX)
}

fn write_error(dest: &Path, err: impl std::fmt::Display) -> PatchError {
    PatchError::ArchiveWriteFailed {
        path: dest.display().to_string(),
        reason: err.to_string(),
    }
}

/// Write `entries` into a new deflated archive at `dest`
///
/// Any failure aborts the whole archive; the staged file is removed and
/// nothing appears at `dest`. An existing file at `dest` is never replaced.
pub fn write_archive(
    dest: &Path,
    entries: &[ArchiveEntry],
    progress: &mut dyn ProgressReporter,
) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| write_error(dest, "archive path has no parent directory"))?;

    let staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(parent)
        .map_err(|e| write_error(dest, e))?;

    let mut writer = ZipWriter::new(staged);
    for entry in entries {
        add_entry(&mut writer, entry, dest)?;
        progress.advance(&entry.name);
    }

    let staged = writer.finish().map_err(|e| write_error(dest, e))?;
    persist(staged, dest)
}

fn add_entry(writer: &mut ZipWriter<NamedTempFile>, entry: &ArchiveEntry, dest: &Path) -> Result<()> {
    let file = File::open(&entry.source).map_err(|e| PatchError::read_failed(&entry.source, e))?;
    let metadata = file
        .metadata()
        .map_err(|e| PatchError::read_failed(&entry.source, e))?;

    let options = entry_options(&metadata);
    writer
        .start_file(entry.name.as_str(), options)
        .map_err(|e| write_error(dest, e))?;

    let mut reader = BufReader::new(file);
    std::io::copy(&mut reader, writer).map_err(|e| write_error(dest, format!("{}: {e}", entry.name)))?;
    Ok(())
}

fn entry_options(metadata: &std::fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(metadata.len() > u64::from(u32::MAX));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode() & 0o7777)
    }

    #[cfg(not(unix))]
    {
        options
    }
}

fn persist(staged: NamedTempFile, dest: &Path) -> Result<()> {
    staged
        .as_file()
        .sync_all()
        .map_err(|e| write_error(dest, e))?;
    staged.persist_noclobber(dest).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            write_error(dest, "archive already exists")
        } else {
            write_error(dest, e.error)
        }
    })?;
    Ok(())
}
