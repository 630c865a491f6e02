//! Per-phase progress bars for tree construction, pairing and composition

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates one progress bar per pipeline phase
///
/// Phases that run concurrently (the grid and cube trees) each get their own
/// bar in the shared [`MultiProgress`] so their updates never interleave.
pub struct ProgressManager {
    multi_progress: MultiProgress,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{percent:>3}}% {{elapsed_precise}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Add a bar for one phase
    ///
    /// The bar starts with zero length; the phase sets its length once the
    /// amount of work is known.
    pub fn phase(&self, label: &str) -> ProgressBar {
        let bar = ProgressBar::new(0);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.multi_progress.add(bar)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
