//! Single-page fetch and extraction.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::PageError;
use super::page_url::{DEFAULT_BASE_PATH_MARKER, base_host, page_url};
use crate::extract::{Row, RowExtractor};
use crate::fetch::PageFetcher;
use crate::plan::PageNumber;

/// Fetches one listing page and extracts its rows.
///
/// Cloning is cheap: the fetcher and extractor are shared behind `Arc`.
/// Any failure is returned as a [`PageError`] tagged with the page number;
/// nothing is retried or swallowed here.
#[derive(Clone)]
pub struct PageFetchTask {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RowExtractor>,
    base_path_marker: Arc<str>,
}

impl std::fmt::Debug for PageFetchTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetchTask")
            .field("base_path_marker", &self.base_path_marker)
            .finish_non_exhaustive()
    }
}

impl PageFetchTask {
    /// Creates a task using the default base path marker.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Arc<dyn RowExtractor>) -> Self {
        Self {
            fetcher,
            extractor,
            base_path_marker: Arc::from(DEFAULT_BASE_PATH_MARKER),
        }
    }

    /// Overrides the path marker used to derive the base host for links.
    #[must_use]
    pub fn with_base_path_marker(mut self, marker: impl Into<Arc<str>>) -> Self {
        self.base_path_marker = marker.into();
        self
    }

    /// Fetches `page` of the listing at `base_url` and returns its rows.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Fetch`] if the page address is invalid or the
    /// request fails, and [`PageError::Extract`] if the content does not
    /// have the expected shape.
    #[instrument(skip(self, base_url))]
    pub async fn fetch(&self, base_url: &str, page: PageNumber) -> Result<Vec<Row>, PageError> {
        info!(page, "fetching page");

        let url = page_url(base_url, page).map_err(|source| PageError::Fetch { page, source })?;
        let host = base_host(base_url, &self.base_path_marker)
            .map_err(|source| PageError::Fetch { page, source })?;

        let html = self
            .fetcher
            .fetch_page(&url)
            .await
            .map_err(|source| PageError::Fetch { page, source })?;

        let rows = self
            .extractor
            .extract_rows(&host, &html)
            .map_err(|source| PageError::Extract { page, source })?;

        debug!(page, rows = rows.len(), "page extracted");
        Ok(rows)
    }
}
