//! Spinner-based progress reporting.
//!
//! Long operations (network fetches, package installation) show an animated
//! spinner in interactive terminals. Spinners are hidden when the
//! `ATELIER_NO_PROGRESS` environment variable is set or when the `--no-progress`
//! flag disabled them for the current process, which keeps output clean in
//! scripts and CI pipelines.

use crate::constants::NO_PROGRESS_ENV;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static DISABLED: AtomicBool = AtomicBool::new(false);

/// Disable all progress output for the remainder of the process.
///
/// Called once when the CLI sees `--no-progress`.
pub fn disable() {
    DISABLED.store(true, Ordering::Relaxed);
}

fn is_progress_disabled() -> bool {
    DISABLED.load(Ordering::Relaxed) || std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// An indeterminate spinner with consistent styling.
///
/// Wraps the `indicatif` spinner so that every call site gets the same tick
/// animation and automatically respects the progress kill switches.
///
/// # Examples
///
/// ```rust
/// use atelier_cli::utils::progress::Spinner;
///
/// let spinner = Spinner::new("Installing components...");
/// // ... do work ...
/// spinner.finish_with_message("Components installed");
/// ```
pub struct Spinner {
    inner: ProgressBar,
}

impl Spinner {
    /// Create and start a spinner with an initial message.
    pub fn new(message: impl Into<String>) -> Self {
        let bar = if is_progress_disabled() {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_message(message.into());
        Self { inner: bar }
    }

    /// Update the message shown next to the spinner.
    pub fn set_message(&self, message: impl Into<String>) {
        self.inner.set_message(message.into());
    }

    /// Stop the spinner, leaving a final message on screen.
    pub fn finish_with_message(&self, message: impl Into<String>) {
        self.inner.finish_with_message(message.into());
    }

    /// Stop the spinner and erase its line.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .expect("spinner template is valid")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        // Hidden or not, the spinner API must be safe to drive end to end.
        let spinner = Spinner::new("working");
        spinner.set_message("still working");
        spinner.finish_and_clear();
    }

    #[test]
    fn test_disable_hides_spinner() {
        disable();
        assert!(is_progress_disabled());
        let spinner = Spinner::new("hidden");
        spinner.finish_with_message("done");
    }
}
