//! Extraction of structured rows and pagination metadata from listing HTML.
//!
//! Court listing portals render results as positional, unlabelled tables, so
//! both extractors locate their data by table index. Those indices are a
//! data-shape contract with the portal and are configurable.
//!
//! - [`RowExtractor`] / [`HtmlTableExtractor`] - case rows of one result page
//! - [`PaginationExtractor`] / [`HtmlPaginationExtractor`] - element counters
//!   from the summary page

mod error;
mod pagination;
mod table;

pub use error::ExtractError;
pub use pagination::{DEFAULT_PAGINATION_TABLE_INDEX, HtmlPaginationExtractor};
pub use table::{DEFAULT_CASE_TABLE_INDEX, HtmlTableExtractor};

use std::sync::LazyLock;

use scraper::Selector;

/// One output row: ordered field strings with no fixed width.
pub type Row = Vec<String>;

/// Element counters reported by the listing summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Total number of elements in the listing.
    pub total_elements: u32,
    /// Number of elements rendered per page.
    pub per_page: u32,
}

/// Turns raw page content into structured rows.
pub trait RowExtractor: Send + Sync {
    /// Extracts the case rows of one result page. Relative document links are
    /// resolved against `base_host`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the page does not have the expected shape.
    fn extract_rows(&self, base_host: &str, html: &str) -> Result<Vec<Row>, ExtractError>;
}

/// Reads pagination counters from the listing summary page.
pub trait PaginationExtractor: Send + Sync {
    /// Extracts the total element count and elements-per-page.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the counters are missing, unreadable or
    /// report zero elements per page.
    fn extract_pagination(&self, html: &str) -> Result<PaginationInfo, ExtractError>;
}

#[allow(clippy::expect_used)]
pub(crate) static TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("table selector is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
pub(crate) static ROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("tr selector is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
pub(crate) static CELL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td").expect("td selector is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
pub(crate) static LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a").expect("a selector is valid") // Static pattern, safe to panic
});
