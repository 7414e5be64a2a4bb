//! Partitioning of a page range into per-file chunks.

use std::ops::RangeInclusive;

use super::OutputError;
use crate::plan::{PageNumber, RequestPlan};

/// Default maximum number of pages written to one range file.
pub const DEFAULT_MAX_PAGES_PER_FILE: u32 = 1000;

/// A contiguous page range written to a single output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    /// File name (without directory) for this chunk.
    pub file_name: String,
    /// First page in the chunk.
    pub start_page: PageNumber,
    /// Last page in the chunk (inclusive).
    pub end_page: PageNumber,
}

impl OutputChunk {
    fn new(start_page: PageNumber, end_page: PageNumber) -> Self {
        Self {
            file_name: format!("output_{start_page}-{end_page}.csv"),
            start_page,
            end_page,
        }
    }

    /// Pages covered by this chunk in ascending order.
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<PageNumber> {
        self.start_page..=self.end_page
    }
}

/// Splits the plan's range into ascending, contiguous chunks of at most
/// `max_pages_per_file` pages that cover it exactly once.
///
/// # Errors
///
/// Returns [`OutputError::InvalidChunkSize`] if `max_pages_per_file` is zero.
pub fn plan_chunks(
    plan: RequestPlan,
    max_pages_per_file: u32,
) -> Result<Vec<OutputChunk>, OutputError> {
    if max_pages_per_file == 0 {
        return Err(OutputError::InvalidChunkSize {
            value: max_pages_per_file,
        });
    }

    let last_offset = max_pages_per_file - 1;
    let mut chunks = Vec::new();
    let mut start = plan.start();
    loop {
        let end = start.saturating_add(last_offset).min(plan.end());
        chunks.push(OutputChunk::new(start, end));
        if end >= plan.end() {
            break;
        }
        start = end + 1;
    }
    Ok(chunks)
}
