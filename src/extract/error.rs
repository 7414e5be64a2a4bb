//! Error types for listing extraction.

use thiserror::Error;

/// Errors raised when listing HTML does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The document has fewer tables than the extractor expects.
    #[error("table #{index} not found (document has {found} tables)")]
    TableNotFound {
        /// 1-based index of the expected table.
        index: usize,
        /// Number of tables present in the document.
        found: usize,
    },

    /// The pagination summary cell is missing.
    #[error("pagination summary not found in table #{table_index}")]
    PaginationNotFound {
        /// 1-based index of the table that was searched.
        table_index: usize,
    },

    /// A counter in the pagination summary could not be parsed.
    #[error("cannot read {what} from pagination text '{text}'")]
    InvalidNumber {
        /// Which counter was being read.
        what: &'static str,
        /// The offending text.
        text: String,
    },

    /// The pagination summary reported zero elements per page.
    #[error("pagination reports {per_page} elements per page")]
    InvalidPagination {
        /// The reported per-page count.
        per_page: u32,
    },
}
