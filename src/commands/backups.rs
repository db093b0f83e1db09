//! Backups command: list snapshots of the target, newest first

use console::Style;
use serde::Serialize;

use crate::cli::BackupsArgs;
use crate::commands::helpers::{GlobalArgs, Session};
use crate::error::{PatchError, Result};
use crate::snapshot;
use crate::validator;

#[derive(Debug, Serialize)]
struct BackupEntry {
    file_name: String,
    path: String,
    taken_at: String,
    size: u64,
}

/// Run backups command
pub fn run(globals: &GlobalArgs, args: BackupsArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let target = validator::validate(&session.target, &session.config.marker)?;

    let mut entries = Vec::new();
    for (name, path) in snapshot::list_snapshots(&target, &session.config.snapshot_prefix)? {
        let size = std::fs::metadata(&path)
            .map_err(|e| PatchError::read_failed(&path, e))?
            .len();
        entries.push(BackupEntry {
            file_name: name.file_name(),
            path: path.display().to_string(),
            taken_at: name.taken_at().format("%Y-%m-%d %H:%M:%S").to_string(),
            size,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No backups found in {}", target.root().display());
        return Ok(());
    }

    println!("Backups in {}:", target.root().display());
    for (i, entry) in entries.iter().enumerate() {
        let marker = if i == 0 { " (restore target)" } else { "" };
        println!(
            "  {}  {}  {} bytes{}",
            Style::new().bold().yellow().apply_to(&entry.file_name),
            entry.taken_at,
            entry.size,
            Style::new().dim().apply_to(marker)
        );
    }
    Ok(())
}
