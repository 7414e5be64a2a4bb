//! Pagination summary extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::{CELL, ExtractError, PaginationExtractor, PaginationInfo, ROW, TABLE};

/// 1-based position of the pagination summary table.
pub const DEFAULT_PAGINATION_TABLE_INDEX: usize = 5;

/// Position of the summary cell within its row (1-based).
const SUMMARY_CELL_INDEX: usize = 2;

/// The per-page count follows the second occurrence of this marker, as in
/// "Всего по запросу найдено 253. Показано по 25."
const PER_PAGE_MARKER: &str = "по ";

#[allow(clippy::expect_used)]
static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+").expect("number regex is valid") // Static pattern, safe to panic
});

/// Reads element counters from the summary table of a listing page.
#[derive(Debug, Clone)]
pub struct HtmlPaginationExtractor {
    table_index: usize,
}

impl Default for HtmlPaginationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPaginationExtractor {
    /// Creates an extractor reading the default summary table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table_index(DEFAULT_PAGINATION_TABLE_INDEX)
    }

    /// Creates an extractor reading the table at the given 1-based position.
    #[must_use]
    pub fn with_table_index(table_index: usize) -> Self {
        Self { table_index }
    }

    /// Text of the summary cell of every row in the summary table.
    fn summary_cells(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let tables: Vec<ElementRef<'_>> = document.select(&TABLE).collect();
        let table = self
            .table_index
            .checked_sub(1)
            .and_then(|idx| tables.get(idx))
            .ok_or(ExtractError::TableNotFound {
                index: self.table_index,
                found: tables.len(),
            })?;

        let cells: Vec<String> = table
            .select(&ROW)
            .filter_map(|tr| tr.select(&CELL).nth(SUMMARY_CELL_INDEX - 1))
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.is_empty() {
            return Err(ExtractError::PaginationNotFound {
                table_index: self.table_index,
            });
        }
        Ok(cells)
    }
}

impl PaginationExtractor for HtmlPaginationExtractor {
    /// Parses the summary cell of each row; the last row that parses wins.
    fn extract_pagination(&self, html: &str) -> Result<PaginationInfo, ExtractError> {
        let document = Html::parse_document(html);

        let mut found = None;
        let mut last_error = None;
        for text in self.summary_cells(&document)? {
            match parse_summary(&text) {
                Ok(info) => found = Some(info),
                Err(e) => {
                    debug!(error = %e, "skipping summary row");
                    last_error = Some(e);
                }
            }
        }

        match (found, last_error) {
            (Some(info), _) => {
                debug!(
                    total_elements = info.total_elements,
                    per_page = info.per_page,
                    "extracted pagination"
                );
                Ok(info)
            }
            (None, Some(e)) => Err(e),
            (None, None) => Err(ExtractError::PaginationNotFound {
                table_index: self.table_index,
            }),
        }
    }
}

fn parse_summary(text: &str) -> Result<PaginationInfo, ExtractError> {
    let total_elements = FIRST_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(|| ExtractError::InvalidNumber {
            what: "total elements",
            text: text.to_string(),
        })?;

    let per_page = text
        .split(PER_PAGE_MARKER)
        .nth(2)
        .map(|part| part.replacen('.', "", 1))
        .and_then(|part| part.trim().parse::<u32>().ok())
        .ok_or_else(|| ExtractError::InvalidNumber {
            what: "elements per page",
            text: text.to_string(),
        })?;

    if per_page == 0 {
        return Err(ExtractError::InvalidPagination { per_page });
    }

    Ok(PaginationInfo {
        total_elements,
        per_page,
    })
}
