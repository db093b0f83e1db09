//! Status lines printed while installing

use console::Style;

use super::InstallSummary;
use crate::finalizer::FinalizeOutcome;
use crate::hash;
use crate::overlay::{OverlayReport, OverlayStatus};
use crate::snapshot::SnapshotHandle;

pub fn print_snapshot(handle: &SnapshotHandle) {
    println!(
        "{} {} ({} files)",
        Style::new().bold().green().apply_to("Backup created:"),
        handle.name,
        handle.files
    );
}

pub fn print_overlay_report(report: &OverlayReport) {
    let mut summary = format!(
        "Applied {} of {} overlay(s)",
        report.applied().count(),
        report.outcomes.len()
    );
    if report.missing() + report.failed() > 0 {
        summary.push_str(&format!(
            " ({} missing, {} failed)",
            report.missing(),
            report.failed()
        ));
    }
    println!("{summary}");

    for outcome in &report.outcomes {
        if let OverlayStatus::Applied { files, digest } = &outcome.status {
            println!(
                "  {} {} ({} files, {})",
                Style::new().green().apply_to("✓"),
                outcome.name(),
                files,
                hash::short(digest)
            );
        } else if let Some(err) = outcome.error() {
            println!("  {} {}", Style::new().yellow().apply_to("!"), err);
        }
    }
    if let Some(asset) = &report.asset_path {
        println!("  {} {}", Style::new().green().apply_to("✓"), asset.display());
    }
}

pub fn print_finalizer(outcome: &FinalizeOutcome) {
    if let Some(warning) = outcome.warning() {
        println!(
            "{} {}. Ignoring the error.",
            Style::new().bold().yellow().apply_to("Warning:"),
            warning
        );
    }
}

pub fn print_summary(summary: &InstallSummary) {
    println!(
        "{} Patch list written to {}",
        Style::new().bold().green().apply_to("Installation completed."),
        summary.manifest.display()
    );
    match &summary.snapshot {
        Some(handle) => println!("  Backup: {}", handle.name),
        None => println!("  Backup: skipped"),
    }
    println!("  Safe mode: {}", if summary.safe_mode { "on" } else { "off" });
    println!(
        "  Overlays: {} of {} applied",
        summary.report.applied().count(),
        summary.report.outcomes.len()
    );
    if !summary.finalizer.succeeded() {
        println!("  Finalize script: finished with warnings");
    }
}
