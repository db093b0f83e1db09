//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting for snapshots and overlay application
//! - Interactive progress bars using indicatif
//! - Silent progress for tests and non-terminal runs
//! - Yes/no prompts standing in for the original dialog boxes (see [`prompt`])

pub mod prompt;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for long-running operations
///
/// Components report through this trait so they stay agnostic of whether
/// anything is drawn at all.
pub trait ProgressReporter: Send + Sync {
    /// Begin a phase with a known number of steps
    fn start(&mut self, label: &str, total: u64);

    /// Mark one step done, naming the item just processed
    fn advance(&mut self, item: &str);

    /// Finish the current phase
    fn finish(&mut self);

    /// Abandon the current phase on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with visual progress bars
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:>10.cyan.bold} [{bar:40.green/yellow}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, label: &str, total: u64) {
        let bar = ProgressBar::new(total);
        bar.set_style(Self::style());
        bar.set_prefix(label.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, item: &str) {
        if let Some(ref bar) = self.bar {
            // Truncate long paths for display
            let display_path = if item.chars().count() > 50 {
                let tail: String = item
                    .chars()
                    .rev()
                    .take(47)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("...{tail}")
            } else {
                item.to_string()
            };
            bar.set_message(display_path);
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

/// Silent progress reporter
///
/// No-op implementation used when output is not a terminal and in tests.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _label: &str, _total: u64) {}

    fn advance(&mut self, _item: &str) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter for the current stderr
pub fn reporter_for_terminal() -> Box<dyn ProgressReporter> {
    if console::Term::stderr().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}
