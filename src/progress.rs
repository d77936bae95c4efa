//! Progress display for board batches, using indicatif

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const BOARD_TEMPLATE: &str = "{spinner:.green} {pos}/{len} boards [{bar:30.cyan/blue}] {wide_msg}";

/// One bar over the reference boards of a batch. Hidden when disabled, so
/// callers never need to check.
#[derive(Debug)]
pub struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    /// Starts a bar over `boards` files, unless progress is disabled or
    /// there is nothing to show
    pub fn start(enabled: bool, boards: usize) -> Self {
        if !enabled || boards == 0 {
            return Self { bar: None };
        }
        let bar = ProgressBar::new(boards as u64);
        let style = ProgressStyle::with_template(BOARD_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        debug!("Progress bar over {} boards", boards);
        Self { bar: Some(bar) }
    }

    #[cfg(test)]
    fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, |bar| bar.position())
    }

    /// Shows the board about to be laid out
    pub fn board_started(&self, board: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(board.display().to_string());
        }
    }

    pub fn board_done(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Clears the bar line and leaves a summary
    pub fn finish(self, panels: usize) {
        if let Some(bar) = self.bar {
            bar.finish_with_message(format!("{} panels written", panels));
        }
    }

    /// Leaves the bar where the batch stopped
    pub fn fail(self, board: &Path) {
        if let Some(bar) = self.bar {
            bar.abandon_with_message(format!("stopped at {}", board.display()));
        }
    }
}
