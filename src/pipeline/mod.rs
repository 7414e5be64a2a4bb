//! The scraping facade.
//!
//! [`ListingScraper`] wires the fetcher, the extractors, the page collector
//! and the output writers together. It offers the two modes of the tool:
//! every page of a listing into `output.csv`, or an explicit page range into
//! chunked `output_<start>-<end>.csv` files.
//!
//! Output is all-or-nothing: when any page fails, no file is written and the
//! first failure is returned as [`ScrapeError::Aggregate`].
//!
//! # Example
//!
//! ```no_run
//! use court_scraper_core::{ListingScraper, ScrapeConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scraper = ListingScraper::new(ScrapeConfig::default())?;
//! let url = "https://court.example/modules.php?name=sud_delo&op=rs";
//! let pages = scraper.request_count(url).await?;
//! let file = scraper.scrape_all(url, pages).await?;
//! println!("wrote {}", file.display());
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ScrapeError;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::collect::{PageCollector, PageFetchTask, ProgressReporter, ResultSet, required_pages};
use crate::config::ScrapeConfig;
use crate::extract::{
    HtmlPaginationExtractor, HtmlTableExtractor, PaginationExtractor, RowExtractor,
};
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::output::{RangeFileWriter, SequentialFileWriter};
use crate::plan::{PageNumber, RequestPlan};

/// Scrapes a paginated court listing into delimited files.
pub struct ListingScraper {
    fetcher: Arc<dyn PageFetcher>,
    row_extractor: Arc<dyn RowExtractor>,
    pagination_extractor: Arc<dyn PaginationExtractor>,
    config: ScrapeConfig,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl std::fmt::Debug for ListingScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingScraper")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl ListingScraper {
    /// Creates a scraper backed by the HTTP fetcher and HTML extractors.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let fetcher =
            HttpPageFetcher::with_timeouts(config.connect_timeout_secs, config.read_timeout_secs)
                .map_err(ScrapeError::Client)?;
        Ok(Self::with_components(
            Arc::new(fetcher),
            Arc::new(HtmlTableExtractor::new()),
            Arc::new(HtmlPaginationExtractor::new()),
            config,
        ))
    }

    /// Creates a scraper from explicit collaborators.
    #[must_use]
    pub fn with_components(
        fetcher: Arc<dyn PageFetcher>,
        row_extractor: Arc<dyn RowExtractor>,
        pagination_extractor: Arc<dyn PaginationExtractor>,
        config: ScrapeConfig,
    ) -> Self {
        Self {
            fetcher,
            row_extractor,
            pagination_extractor,
            config,
            progress: None,
        }
    }

    /// Attaches a progress reporter notified for every page.
    #[must_use]
    pub fn with_progress(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(reporter);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetches the listing summary at `url` and returns how many pages the
    /// listing spans.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] or [`ScrapeError::Extract`] if the
    /// summary cannot be read, and [`ScrapeError::Count`] if it reports zero
    /// elements per page.
    #[instrument(skip(self))]
    pub async fn request_count(&self, url: &str) -> Result<PageNumber, ScrapeError> {
        let html = self.fetcher.fetch_page(url).await?;
        let info = self.pagination_extractor.extract_pagination(&html)?;
        let pages = required_pages(info.total_elements, info.per_page)?;
        info!(
            total_elements = info.total_elements,
            per_page = info.per_page,
            pages,
            "listing size determined"
        );
        Ok(pages)
    }

    /// Collects pages `1..=page_count` and writes them to `output.csv`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Input`] for an empty listing,
    /// [`ScrapeError::Aggregate`] if any page failed (no file is written), and
    /// [`ScrapeError::Output`] if the file cannot be written.
    #[instrument(skip(self))]
    pub async fn scrape_all(
        &self,
        url: &str,
        page_count: PageNumber,
    ) -> Result<PathBuf, ScrapeError> {
        let plan = RequestPlan::all(page_count)?;
        let results = self.collect(url, plan).await?;

        let path = SequentialFileWriter::new(self.config.output_settings())
            .write(&results, page_count)?;
        info!(
            pages = results.len(),
            failures = 0,
            files = 1,
            "scrape complete"
        );
        Ok(path)
    }

    /// Collects the pages of `plan` and writes them to chunked range files.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Output`] for an invalid chunk size (before any
    /// request), [`ScrapeError::Aggregate`] if any page failed (no file is
    /// written), and [`ScrapeError::Output`] if a file cannot be written.
    #[instrument(skip(self, plan), fields(start = plan.start(), end = plan.end()))]
    pub async fn scrape_range(
        &self,
        url: &str,
        plan: RequestPlan,
    ) -> Result<Vec<PathBuf>, ScrapeError> {
        let writer = RangeFileWriter::new(
            self.config.output_settings(),
            self.config.max_pages_per_file,
        )?;
        let results = self.collect(url, plan).await?;

        let paths = writer.write(&results, plan)?;
        info!(
            pages = results.len(),
            failures = 0,
            files = paths.len(),
            "scrape complete"
        );
        Ok(paths)
    }

    async fn collect(&self, url: &str, plan: RequestPlan) -> Result<ResultSet, ScrapeError> {
        let mut collector = PageCollector::new(self.config.max_concurrency)?
            .with_fault_cooldown(self.config.fault_cooldown);
        if let Some(progress) = &self.progress {
            collector = collector.with_progress(Arc::clone(progress));
        }

        let task = PageFetchTask::new(Arc::clone(&self.fetcher), Arc::clone(&self.row_extractor))
            .with_base_path_marker(self.config.base_path_marker.as_str());

        let collection = collector.collect(&task, url, plan.pages()).await?;
        let (results, failures) = collection.into_parts();

        if let Some(error) = ScrapeError::aggregate(failures) {
            warn!(
                pages = results.len(),
                error = %error,
                "discarding collected pages"
            );
            return Err(error);
        }
        Ok(results)
    }
}
