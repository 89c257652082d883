//! Terminal progress display for the training and generation pipeline

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static LOADING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("[{elapsed_precise}] {spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Shows image loading progress followed by one spinner line per stage
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden progress display; call [`Self::start_loading`] to show it
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show a bar over `file_count` training images
    pub fn start_loading(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(LOADING_STYLE.clone());
        self.bar = bar;
    }

    /// Advance the bar after an image was decoded
    pub fn file_loaded(&self, path: &Path) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        self.bar.set_message(name.to_string());
        self.bar.inc(1);
    }

    /// Switch to a spinner describing the current stage
    pub fn start_stage(&mut self, message: &str) {
        self.bar.finish_and_clear();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(STAGE_STYLE.clone());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(message.to_string());
        self.bar = spinner;
    }

    /// Number of steps recorded on the current bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
