//! CSV writers replaying collected pages in ascending page order.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Writer, WriterBuilder};
use tracing::{debug, info, instrument};

use super::chunk::{OutputChunk, plan_chunks};
use super::{OutputError, OutputSettings};
use crate::collect::ResultSet;
use crate::plan::{PageNumber, RequestPlan};

/// File name used by [`SequentialFileWriter`].
pub const SEQUENTIAL_FILE_NAME: &str = "output.csv";

/// Writes a range of collected pages into size-bounded chunk files.
#[derive(Debug, Clone)]
pub struct RangeFileWriter {
    settings: OutputSettings,
    max_pages_per_file: u32,
}

impl RangeFileWriter {
    /// Creates a writer producing files of at most `max_pages_per_file` pages.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::InvalidChunkSize`] if `max_pages_per_file` is zero.
    pub fn new(settings: OutputSettings, max_pages_per_file: u32) -> Result<Self, OutputError> {
        if max_pages_per_file == 0 {
            return Err(OutputError::InvalidChunkSize {
                value: max_pages_per_file,
            });
        }
        Ok(Self {
            settings,
            max_pages_per_file,
        })
    }

    /// Returns the configured chunk size.
    #[must_use]
    pub fn max_pages_per_file(&self) -> u32 {
        self.max_pages_per_file
    }

    /// Writes one `output_<start>-<end>.csv` file per chunk of `plan`.
    ///
    /// Pages of the plan missing from `results` are skipped. Writing stops at
    /// the first file that fails; files already written are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if a file cannot be created, written or flushed.
    #[instrument(skip(self, results, plan), fields(start = plan.start(), end = plan.end()))]
    pub fn write(
        &self,
        results: &ResultSet,
        plan: RequestPlan,
    ) -> Result<Vec<PathBuf>, OutputError> {
        let chunks = plan_chunks(plan, self.max_pages_per_file)?;
        debug!(files = chunks.len(), "writing range files");

        let mut written = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            written.push(self.write_chunk(results, chunk)?);
        }
        Ok(written)
    }

    fn write_chunk(
        &self,
        results: &ResultSet,
        chunk: &OutputChunk,
    ) -> Result<PathBuf, OutputError> {
        let path = self.settings.output_dir.join(&chunk.file_name);
        let mut writer = self.settings.open(&path)?;

        let mut rows = 0usize;
        for page in chunk.pages() {
            if let Some(page_rows) = results.get(page) {
                rows += write_rows(&mut writer, &path, page_rows)?;
            }
        }

        writer.flush().map_err(|e| OutputError::io(&path, e))?;
        info!(file = %path.display(), rows, "file created");
        Ok(path)
    }
}

/// Writes all collected pages into a single `output.csv`.
#[derive(Debug, Clone)]
pub struct SequentialFileWriter {
    settings: OutputSettings,
}

impl SequentialFileWriter {
    /// Creates a writer using the given settings.
    #[must_use]
    pub fn new(settings: OutputSettings) -> Self {
        Self { settings }
    }

    /// Writes the header, then the rows of pages `1..page_count` in ascending
    /// order.
    ///
    /// The final page (`page_count` itself) is not replayed. Pages missing
    /// from `results` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] at the first row that cannot be written.
    #[instrument(skip(self, results))]
    pub fn write(
        &self,
        results: &ResultSet,
        page_count: PageNumber,
    ) -> Result<PathBuf, OutputError> {
        let path = self.settings.output_dir.join(SEQUENTIAL_FILE_NAME);
        let mut writer = self.settings.open(&path)?;

        let mut rows = 0usize;
        for page in 1..page_count {
            if let Some(page_rows) = results.get(page) {
                rows += write_rows(&mut writer, &path, page_rows)?;
            }
        }

        writer.flush().map_err(|e| OutputError::io(&path, e))?;
        info!(file = %path.display(), rows, "file created");
        Ok(path)
    }
}

impl OutputSettings {
    /// Creates `path` and writes the header row.
    fn open(&self, path: &Path) -> Result<Writer<File>, OutputError> {
        let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(file);
        writer
            .write_record(&self.header)
            .map_err(|e| OutputError::csv(path, e))?;
        Ok(writer)
    }
}

fn write_rows(
    writer: &mut Writer<File>,
    path: &Path,
    rows: &[Vec<String>],
) -> Result<usize, OutputError> {
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| OutputError::csv(path, e))?;
    }
    Ok(rows.len())
}
