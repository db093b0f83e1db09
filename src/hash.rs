//! BLAKE3 digests of overlay archives
//!
//! Digests are recorded in the install manifest so a patched folder can be
//! traced back to the exact archives that were extracted into it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{PatchError, Result};

/// Prefix marking the digest algorithm
pub const HASH_PREFIX: &str = "blake3:";

/// Length of the digest shown in terminal output
const SHORT_LEN: usize = 12;

/// Stream a file through BLAKE3
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| PatchError::read_failed(path, e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| PatchError::read_failed(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Abbreviated digest for status lines
pub fn short(digest: &str) -> &str {
    let hex = digest.strip_prefix(HASH_PREFIX).unwrap_or(digest);
    hex.get(..SHORT_LEN).unwrap_or(hex)
}
