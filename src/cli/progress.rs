//! Terminal spinner for busy phases.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::flow::Progress;

/// Shows an indicatif spinner on stderr while a phase runs.
#[derive(Default)]
pub struct SpinnerProgress {
    current: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(message: &str) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl Progress for SpinnerProgress {
    fn begin(&self, message: &str) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.finish_and_clear();
            }
            *current = Some(Self::spinner(message));
        }
    }

    fn end(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(bar) = current.take() {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_end_clear_spinner() {
        let progress = SpinnerProgress::new();
        progress.begin("Extracting...");
        progress.begin("Summarizing...");
        assert!(progress.current.lock().unwrap().is_some());
        progress.end();
        assert!(progress.current.lock().unwrap().is_none());
        // Ending twice is harmless.
        progress.end();
    }
}
