//! Case table extraction.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::{CELL, ExtractError, LINK, ROW, Row, RowExtractor, TABLE};

/// 1-based position of the case table among all `<table>` elements.
pub const DEFAULT_CASE_TABLE_INDEX: usize = 6;

/// Extracts case rows from the positional result table of a listing page.
///
/// Each `<tr>` becomes one row. For each `<td>`:
/// - non-empty text is normalized and kept;
/// - an empty cell contributes its document links joined by a space, each
///   prefixed with the base host;
/// - an empty cell without links is skipped, so rows may be ragged.
///
/// Rows without any `<td>` (header rows) are dropped. A page without the case
/// table yields no rows.
#[derive(Debug, Clone)]
pub struct HtmlTableExtractor {
    table_index: usize,
}

impl Default for HtmlTableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlTableExtractor {
    /// Creates an extractor reading the default case table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table_index(DEFAULT_CASE_TABLE_INDEX)
    }

    /// Creates an extractor reading the table at the given 1-based position.
    #[must_use]
    pub fn with_table_index(table_index: usize) -> Self {
        Self { table_index }
    }
}

impl RowExtractor for HtmlTableExtractor {
    fn extract_rows(&self, base_host: &str, html: &str) -> Result<Vec<Row>, ExtractError> {
        let document = Html::parse_document(html);
        let tables: Vec<ElementRef<'_>> = document.select(&TABLE).collect();
        let Some(table) = self
            .table_index
            .checked_sub(1)
            .and_then(|idx| tables.get(idx))
        else {
            warn!(
                index = self.table_index,
                found = tables.len(),
                "case table not found, page has no rows"
            );
            return Ok(Vec::new());
        };

        let rows: Vec<Row> = table
            .select(&ROW)
            .map(|tr| extract_row(base_host, tr))
            .filter(|row| !row.is_empty())
            .collect();

        debug!(rows = rows.len(), "extracted case rows");
        Ok(rows)
    }
}

fn extract_row(base_host: &str, tr: ElementRef<'_>) -> Row {
    tr.select(&CELL)
        .filter_map(|td| {
            let text = td.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                document_links(base_host, td)
            } else {
                Some(normalize_text(text))
            }
        })
        .collect()
}

fn document_links(base_host: &str, td: ElementRef<'_>) -> Option<String> {
    let links: Vec<String> = td
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| format!("{base_host}{}", href.trim()))
        .collect();
    (!links.is_empty()).then(|| links.join(" "))
}

/// Replaces `ё` with `е` and restores the space the portal drops before the
/// first "ОТВЕТЧИК" party label.
fn normalize_text(text: &str) -> String {
    text.replace('ё', "е").replacen("ОТВЕТЧИК", " ОТВЕТЧИК", 1)
}
