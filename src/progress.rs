// src/progress.rs
use indicatif::{ProgressBar, ProgressStyle};

/// Row counter for a single CSV pass
///
/// Shows a spinner on an interactive terminal and logs a line every
/// `interval` rows so redirected runs still report progress.
pub struct RowProgress {
    bar: ProgressBar,
    label: String,
    interval: usize,
    rows: usize,
}

impl RowProgress {
    pub fn new(label: &str, interval: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} {pos} rows") {
            bar.set_style(style);
        }
        bar.set_message(label.to_string());
        Self::with_bar(bar, label, interval)
    }

    /// No terminal output, only the periodic log lines
    #[cfg(test)]
    pub fn hidden(label: &str, interval: usize) -> Self {
        Self::with_bar(ProgressBar::hidden(), label, interval)
    }

    fn with_bar(bar: ProgressBar, label: &str, interval: usize) -> Self {
        Self {
            bar,
            label: label.to_string(),
            interval,
            rows: 0,
        }
    }

    pub fn tick(&mut self) {
        self.rows += 1;
        self.bar.inc(1);
        if self.interval > 0 && self.rows % self.interval == 0 {
            // Keep the log line from tearing through the spinner
            self.bar
                .suspend(|| log::info!("{}: processed {} rows...", self.label, self.rows));
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Clear the spinner and return the final row count
    pub fn finish(self) -> usize {
        self.bar.finish_and_clear();
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_rows() {
        let mut progress = RowProgress::hidden("clean", 2);
        for _ in 0..5 {
            progress.tick();
        }
        assert_eq!(progress.rows(), 5);
        assert_eq!(progress.finish(), 5);
    }

    #[test]
    fn test_spinner_survives_interval_logging() {
        let mut progress = RowProgress::new("clean", 1);
        for _ in 0..3 {
            progress.tick();
        }
        assert_eq!(progress.finish(), 3);
    }

    #[test]
    fn test_zero_interval_never_divides() {
        let mut progress = RowProgress::hidden("clean", 0);
        progress.tick();
        assert_eq!(progress.finish(), 1);
    }
}
