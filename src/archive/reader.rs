//! Archive extraction
//!
//! Every entry is resolved with `enclosed_name`, so absolute names and names
//! climbing out through `..` are rejected before anything touches disk.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{PatchError, Result};

fn open(archive: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(archive).map_err(|e| PatchError::read_failed(archive, e))?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| PatchError::corrupt(archive, e))
}

/// List the relative paths of all regular file entries in an archive
pub fn list_files(archive: &Path) -> Result<Vec<PathBuf>> {
    let mut zip = open(archive)?;
    let mut files = Vec::with_capacity(zip.len());

    for index in 0..zip.len() {
        let entry = zip
            .by_index(index)
            .map_err(|e| PatchError::corrupt(archive, e))?;
        if entry.is_dir() {
            continue;
        }
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| PatchError::UnsafeArchiveEntry {
                archive: archive.display().to_string(),
                entry: entry.name().to_string(),
            })?;
        files.push(relative);
    }

    Ok(files)
}

/// Extract every entry of `archive` into `dest`
///
/// Parent directories are created as needed and existing files at the same
/// relative path are overwritten. Returns the relative paths of the files
/// written, in archive order.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut zip = open(archive)?;
    let mut written = Vec::with_capacity(zip.len());

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| PatchError::corrupt(archive, e))?;

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| PatchError::UnsafeArchiveEntry {
                archive: archive.display().to_string(),
                entry: entry.name().to_string(),
            })?;
        let target = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| PatchError::write_failed(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| PatchError::write_failed(parent, e))?;
        }

        let mut out = File::create(&target).map_err(|e| PatchError::write_failed(&target, e))?;
        std::io::copy(&mut entry, &mut out)
            .map_err(|e| PatchError::corrupt(archive, format!("{}: {e}", relative.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode().filter(|m| m & 0o777 != 0) {
                fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                    .map_err(|e| PatchError::write_failed(&target, e))?;
            }
        }

        written.push(relative);
    }

    Ok(written)
}
