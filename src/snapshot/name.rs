//! Snapshot file name grammar
//!
//! `<prefix>_<YYYYMMDD>_<HHMMSS>.zip`, e.g. `NTSource_backup_20240115_143000.zip`.
//! Restore selection depends on this exact shape; anything that does not
//! parse is not a snapshot.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};

/// Extension of snapshot archives
pub const SNAPSHOT_EXTENSION: &str = "zip";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_LEN: usize = 15;

/// A parsed snapshot archive name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotName {
    prefix: String,
    taken_at: NaiveDateTime,
}

impl SnapshotName {
    pub fn new(prefix: impl Into<String>, taken_at: NaiveDateTime) -> Self {
        Self {
            prefix: prefix.into(),
            taken_at: taken_at.with_nanosecond(0).unwrap_or(taken_at),
        }
    }

    /// Name for a snapshot taken now, in local time
    pub fn now(prefix: impl Into<String>) -> Self {
        Self::new(prefix, Local::now().naive_local())
    }

    /// Parse a file name under `prefix`; `None` if it does not follow the grammar
    pub fn parse(prefix: &str, file_name: &str) -> Option<Self> {
        let stamp = file_name
            .strip_prefix(prefix)?
            .strip_prefix('_')?
            .strip_suffix(SNAPSHOT_EXTENSION)?
            .strip_suffix('.')?;

        let well_formed = stamp.len() == TIMESTAMP_LEN
            && stamp.char_indices().all(|(i, c)| {
                if i == 8 {
                    c == '_'
                } else {
                    c.is_ascii_digit()
                }
            });
        if !well_formed {
            return None;
        }

        let taken_at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(prefix, taken_at))
    }

    pub fn taken_at(&self) -> NaiveDateTime {
        self.taken_at
    }

    pub fn timestamp(&self) -> String {
        self.taken_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}.{}", self.prefix, self.timestamp(), SNAPSHOT_EXTENSION)
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

impl Ord for SnapshotName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.taken_at
            .cmp(&other.taken_at)
            .then_with(|| self.file_name().cmp(&other.file_name()))
    }
}

impl PartialOrd for SnapshotName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
