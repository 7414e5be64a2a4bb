//! Delimited output of collected pages.
//!
//! Two writers replay a [`ResultSet`](crate::collect::ResultSet) in ascending
//! page order:
//!
//! - [`SequentialFileWriter`] - one `output.csv` for a full-listing scrape
//! - [`RangeFileWriter`] - `output_<start>-<end>.csv` files for a page range,
//!   split every [`DEFAULT_MAX_PAGES_PER_FILE`] pages by default

use std::path::PathBuf;

mod chunk;
mod error;
mod writer;

pub use chunk::{DEFAULT_MAX_PAGES_PER_FILE, OutputChunk, plan_chunks};
pub use error::OutputError;
pub use writer::{RangeFileWriter, SEQUENTIAL_FILE_NAME, SequentialFileWriter};

/// Field delimiter used in every output file.
pub const DELIMITER: u8 = b';';

/// Column names of the case listing table.
#[must_use]
pub fn default_header() -> Vec<String> {
    [
        "№ дела",
        "Дата поступления",
        "Категория / Стороны / Суд",
        "Судья",
        "Дата решения",
        "Решение",
        "Дата вступления в законную силу",
        "Судебные акты",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Where and how output files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    /// Directory receiving the output files.
    pub output_dir: PathBuf,
    /// Header row written first in every file.
    pub header: Vec<String>,
    /// Field delimiter.
    pub delimiter: u8,
}

impl OutputSettings {
    /// Settings writing into `output_dir` with the default header.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            header: default_header(),
            delimiter: DELIMITER,
        }
    }

    /// Replaces the header row.
    #[must_use]
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self::new(".")
    }
}
