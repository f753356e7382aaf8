//! Batch progress display across input files

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Files: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many input files have been processed
///
/// Shows a single bar with the name of the file currently being analyzed.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    completed: usize,
    detected: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create an idle progress manager
    pub const fn new() -> Self {
        Self {
            bar: None,
            completed: 0,
            detected: 0,
        }
    }

    /// Create the bar for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
        self.completed = 0;
        self.detected = 0;
    }

    /// Show the file being analyzed
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(name.into_owned());
        }
    }

    /// Count a finished file and whether its grid was detected
    pub fn complete_file(&mut self, detected: bool) {
        self.completed += 1;
        if detected {
            self.detected += 1;
        }
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Number of files completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Number of completed files with a detected grid
    pub const fn detected(&self) -> usize {
        self.detected
    }

    /// Replace the bar with a final summary
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(format!(
                "{} of {} grids detected",
                self.detected, self.completed
            ));
        }
    }
}
