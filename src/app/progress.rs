//! Progress bar fed by the page collector.

use std::time::Duration;

use court_scraper_core::{PageNumber, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar counting finished pages.
pub(crate) struct PageProgress {
    bar: ProgressBar,
}

impl PageProgress {
    /// Creates a bar for `total` pages, or a hidden one when `visible` is false.
    pub(crate) fn new(total: u32, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::new(u64::from(total));
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_bar} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressReporter for PageProgress {
    fn page_started(&self, page: PageNumber) {
        self.bar.set_message(format!("fetching page {page}"));
    }

    fn page_finished(&self, page: PageNumber, succeeded: bool) {
        if !succeeded {
            self.bar.println(format!("page {page} failed"));
        }
        self.bar.inc(1);
    }
}

/// Whether to draw a progress bar.
pub(crate) fn should_show_progress(stderr_is_terminal: bool, quiet: bool) -> bool {
    stderr_is_terminal && !quiet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_pages_advance_the_bar() {
        let progress = PageProgress::new(3, false);
        progress.page_started(1);
        progress.page_finished(1, true);
        progress.page_started(2);
        progress.page_finished(2, false);
        assert_eq!(progress.position(), 2);
        progress.finish();
    }

    #[test]
    fn test_should_show_progress() {
        assert!(should_show_progress(true, false));
        assert!(!should_show_progress(true, true));
        assert!(!should_show_progress(false, false));
    }
}
