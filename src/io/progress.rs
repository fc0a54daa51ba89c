//! File and region progress bars for batch grid filling

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static REGION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} regions"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Files: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates one batch bar over files and one bar over the current file's regions
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    region_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            region_bar: None,
        }
    }

    /// Create the bars for a batch of `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        // A single file only needs the region bar
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let region_bar = ProgressBar::new(0);
        region_bar.set_style(REGION_STYLE.clone());
        self.region_bar = Some(self.multi_progress.add(region_bar));
    }

    /// Reset the region bar for a new file
    pub fn start_file(&self, path: &Path, regions: usize) {
        if let Some(ref bar) = self.region_bar {
            bar.set_length(regions as u64);
            bar.set_position(0);
            bar.set_prefix(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
        }
    }

    /// Count one more finished region
    pub fn complete_region(&self) {
        if let Some(ref bar) = self.region_bar {
            bar.inc(1);
        }
    }

    /// Count one more finished file
    pub fn complete_file(&self) {
        if let Some(ref bar) = self.batch_bar {
            bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref bar) = self.batch_bar {
            bar.finish_with_message("All files processed");
        }
        if let Some(ref bar) = self.region_bar {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
