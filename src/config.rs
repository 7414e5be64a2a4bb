//! Runtime settings shared by the scraping components.

use std::path::PathBuf;
use std::time::Duration;

use crate::collect::page_url::DEFAULT_BASE_PATH_MARKER;
use crate::collect::{DEFAULT_FAULT_COOLDOWN, DEFAULT_MAX_CONCURRENCY};
use crate::fetch::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::output::{DEFAULT_MAX_PAGES_PER_FILE, OutputSettings, default_header};

/// Settings for one scrape run.
///
/// The defaults match the behaviour of the command-line tool without flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Number of pages fetched at once.
    pub max_concurrency: usize,
    /// Maximum pages per range output file.
    pub max_pages_per_file: u32,
    /// Directory receiving output files.
    pub output_dir: PathBuf,
    /// Header row of every output file.
    pub header: Vec<String>,
    /// Pause after a page task faults, before its slot is released.
    pub fault_cooldown: Duration,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_timeout_secs: u64,
    /// Path marker used to derive the host prefix for document links.
    pub base_path_marker: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_pages_per_file: DEFAULT_MAX_PAGES_PER_FILE,
            output_dir: PathBuf::from("."),
            header: default_header(),
            fault_cooldown: DEFAULT_FAULT_COOLDOWN,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            base_path_marker: DEFAULT_BASE_PATH_MARKER.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Sets the number of pages fetched at once.
    #[must_use]
    pub fn with_max_concurrency(mut self, value: usize) -> Self {
        self.max_concurrency = value;
        self
    }

    /// Sets the maximum number of pages per range output file.
    #[must_use]
    pub fn with_max_pages_per_file(mut self, value: u32) -> Self {
        self.max_pages_per_file = value;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replaces the header row.
    #[must_use]
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }

    /// Sets the fault cooldown.
    #[must_use]
    pub fn with_fault_cooldown(mut self, cooldown: Duration) -> Self {
        self.fault_cooldown = cooldown;
        self
    }

    /// Sets the connect and whole-request timeouts, in seconds.
    #[must_use]
    pub fn with_timeouts(mut self, connect_secs: u64, read_secs: u64) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.read_timeout_secs = read_secs;
        self
    }

    /// Sets the base path marker.
    #[must_use]
    pub fn with_base_path_marker(mut self, marker: impl Into<String>) -> Self {
        self.base_path_marker = marker.into();
        self
    }

    /// Output settings derived from this config.
    #[must_use]
    pub fn output_settings(&self) -> OutputSettings {
        OutputSettings::new(&self.output_dir).with_header(self.header.clone())
    }
}
