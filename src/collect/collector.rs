//! Concurrent page collector with bounded parallelism.
//!
//! This module provides the [`PageCollector`] which runs one Tokio task per
//! requested page, using a semaphore-based admission pool so that at most
//! `max_concurrency` pages are fetched at once.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use court_scraper_core::collect::{PageCollector, PageFetchTask};
//! use court_scraper_core::{HtmlTableExtractor, HttpPageFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let task = PageFetchTask::new(
//!     Arc::new(HttpPageFetcher::new()?),
//!     Arc::new(HtmlTableExtractor::new()),
//! );
//! let collector = PageCollector::new(3)?;
//! let collection = collector
//!     .collect(&task, "https://court.example/modules.php?name=sud_delo", 1..=5)
//!     .await?;
//! println!("pages: {}, failed: {}", collection.results().len(), collection.failures().len());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::{CollectError, PageError, PageFetchTask};
use crate::extract::Row;
use crate::plan::PageNumber;

/// Minimum allowed concurrency value.
pub(crate) const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value. Court portals start blocking clients
/// well before this.
pub(crate) const MAX_CONCURRENCY: usize = 10;

/// Default number of pages fetched at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Default pause after a page task faults.
pub const DEFAULT_FAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// Receives per-page progress notifications from the collector.
pub trait ProgressReporter: Send + Sync {
    /// Called once a page task holds its admission slot and starts fetching.
    fn page_started(&self, page: PageNumber);

    /// Called when a page task finishes, successfully or not.
    fn page_finished(&self, page: PageNumber, succeeded: bool);
}

/// Rows collected per page, iterated in ascending page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pages: BTreeMap<PageNumber, Vec<Row>>,
}

impl ResultSet {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the rows of `page`, returning rows previously stored for it.
    pub fn insert(&mut self, page: PageNumber, rows: Vec<Row>) -> Option<Vec<Row>> {
        self.pages.insert(page, rows)
    }

    /// Returns the rows of `page`, if that page was collected.
    #[must_use]
    pub fn get(&self, page: PageNumber) -> Option<&[Row]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Returns true if `page` was collected.
    #[must_use]
    pub fn contains(&self, page: PageNumber) -> bool {
        self.pages.contains_key(&page)
    }

    /// Number of collected pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no page was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Collected page numbers in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.pages.keys().copied()
    }

    /// Total number of rows across all pages.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

impl FromIterator<(PageNumber, Vec<Row>)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (PageNumber, Vec<Row>)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a collection run: every page that succeeded plus every page
/// failure, in the order the failures were observed.
#[derive(Debug, Default)]
pub struct Collection {
    results: ResultSet,
    failures: Vec<PageError>,
}

impl Collection {
    /// Pages that were fetched and extracted successfully.
    #[must_use]
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// All page failures in the order they were observed.
    #[must_use]
    pub fn failures(&self) -> &[PageError] {
        &self.failures
    }

    /// The first page failure observed, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&PageError> {
        self.failures.first()
    }

    /// Returns true if no page failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Splits the collection into its successful pages and failures.
    #[must_use]
    pub fn into_parts(self) -> (ResultSet, Vec<PageError>) {
        (self.results, self.failures)
    }

    /// Returns the results if every page succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first observed [`PageError`] if any page failed.
    pub fn into_result(self) -> Result<ResultSet, PageError> {
        match self.failures.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(self.results),
        }
    }

    fn record_success(&mut self, page: PageNumber, rows: Vec<Row>) {
        self.results.insert(page, rows);
    }

    fn record_failure(&mut self, error: PageError) {
        self.failures.push(error);
    }
}

/// Collects listing pages concurrently under a fixed admission limit.
///
/// # Concurrency Model
///
/// - Each page runs in its own Tokio task
/// - A semaphore permit is acquired before a page task is spawned
/// - Permits are released automatically when tasks end, including by panic (RAII)
/// - Results are recorded under a single mutex; they are read only after all
///   tasks have joined
///
/// # Failure Isolation
///
/// - A failing page never cancels its siblings; the collector always waits
///   for every task
/// - A panicking task is converted into [`PageError::Fault`] for its page and
///   holds its permit for the fault cooldown before releasing it
pub struct PageCollector {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    max_concurrency: usize,
    /// Pause applied after a task faults.
    fault_cooldown: Duration,
    /// Optional progress sink.
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl std::fmt::Debug for PageCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCollector")
            .field("max_concurrency", &self.max_concurrency)
            .field("fault_cooldown", &self.fault_cooldown)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl PageCollector {
    /// Creates a collector fetching at most `max_concurrency` pages at once.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-10).
    #[instrument(level = "debug")]
    pub fn new(max_concurrency: usize) -> Result<Self, CollectError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&max_concurrency) {
            return Err(CollectError::InvalidConcurrency {
                value: max_concurrency,
            });
        }

        debug!(max_concurrency, "creating page collector");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
            fault_cooldown: DEFAULT_FAULT_COOLDOWN,
            progress: None,
        })
    }

    /// Sets the pause applied after a page task faults.
    #[must_use]
    pub fn with_fault_cooldown(mut self, cooldown: Duration) -> Self {
        self.fault_cooldown = cooldown;
        self
    }

    /// Attaches a progress reporter.
    #[must_use]
    pub fn with_progress(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(reporter);
        self
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Returns the configured fault cooldown.
    #[must_use]
    pub fn fault_cooldown(&self) -> Duration {
        self.fault_cooldown
    }

    /// Fetches every page in `pages` and waits for all of them to finish.
    ///
    /// Page failures do NOT cause this method to error; they are reported in
    /// the returned [`Collection`] alongside the pages that succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::SemaphoreClosed`] if the admission pool is
    /// closed. Tasks already spawned still run to completion.
    #[instrument(skip(self, task, pages), fields(max_concurrency = self.max_concurrency))]
    pub async fn collect(
        &self,
        task: &PageFetchTask,
        base_url: &str,
        pages: impl IntoIterator<Item = PageNumber>,
    ) -> Result<Collection, CollectError> {
        let state = Arc::new(Mutex::new(Collection::default()));
        let base_url: Arc<str> = Arc::from(base_url);
        let mut handles = Vec::new();

        info!("starting page collection");

        for page in pages {
            // Acquire semaphore permit (blocks if at concurrency limit)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| CollectError::SemaphoreClosed)?;

            let task = task.clone();
            let base_url = Arc::clone(&base_url);
            let state = Arc::clone(&state);
            let progress = self.progress.clone();
            let cooldown = self.fault_cooldown;

            handles.push((
                page,
                tokio::spawn(async move {
                    // Permit is dropped when this block exits, even by unwinding (RAII)
                    let _permit = permit;

                    if let Some(progress) = &progress {
                        progress.page_started(page);
                    }

                    let outcome = AssertUnwindSafe(task.fetch(&base_url, page))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|payload| Err(PageError::fault(page, payload.as_ref())));
                    let faulted = matches!(outcome, Err(PageError::Fault { .. }));

                    if let Some(progress) = &progress {
                        progress.page_finished(page, outcome.is_ok());
                    }

                    match outcome {
                        Ok(rows) => {
                            debug!(page, rows = rows.len(), "page collected");
                            lock(&state).record_success(page, rows);
                        }
                        Err(error) => {
                            warn!(page, error = %error, "page failed");
                            lock(&state).record_failure(error);
                        }
                    }

                    if faulted && !cooldown.is_zero() {
                        warn!(
                            page,
                            cooldown_secs = cooldown.as_secs(),
                            "page task faulted; cooling down before releasing slot"
                        );
                        tokio::time::sleep(cooldown).await;
                    }
                }),
            ));
        }

        debug!(
            task_count = handles.len(),
            "waiting for page tasks to complete"
        );

        // Wait for all tasks; a panic that escaped the guard still only fails its page
        for (page, handle) in handles {
            if let Err(e) = handle.await {
                warn!(page, error = %e, "page task panicked outside its guard");
                lock(&state).record_failure(PageError::Fault {
                    page,
                    message: e.to_string(),
                });
            }
        }

        // All tasks have joined, so this is the only remaining reference.
        let collection = match Arc::try_unwrap(state) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => std::mem::take(&mut *lock(&shared)),
        };

        info!(
            collected = collection.results().len(),
            failed = collection.failures().len(),
            rows = collection.results().row_count(),
            "page collection complete"
        );

        Ok(collection)
    }
}

fn lock(state: &Mutex<Collection>) -> MutexGuard<'_, Collection> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::extract::ExtractError;

    #[test]
    fn test_collector_new_valid_concurrency() {
        assert_eq!(PageCollector::new(1).unwrap().max_concurrency(), 1);
        assert_eq!(PageCollector::new(3).unwrap().max_concurrency(), 3);
        assert_eq!(PageCollector::new(10).unwrap().max_concurrency(), 10);
    }

    #[test]
    fn test_collector_new_invalid_concurrency_zero() {
        assert!(matches!(
            PageCollector::new(0),
            Err(CollectError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_collector_new_invalid_concurrency_too_high() {
        assert!(matches!(
            PageCollector::new(11),
            Err(CollectError::InvalidConcurrency { value: 11 })
        ));
    }

    #[test]
    fn test_collector_default_cooldown() {
        let collector = PageCollector::new(DEFAULT_MAX_CONCURRENCY).unwrap();
        assert_eq!(collector.fault_cooldown(), Duration::from_secs(30));
        let collector = collector.with_fault_cooldown(Duration::ZERO);
        assert_eq!(collector.fault_cooldown(), Duration::ZERO);
    }

    #[test]
    fn test_result_set_orders_pages() {
        let mut results = ResultSet::new();
        results.insert(3, vec![vec!["c".to_string()]]);
        results.insert(1, vec![vec!["a".to_string()], vec!["b".to_string()]]);
        assert_eq!(results.pages().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(results.len(), 2);
        assert_eq!(results.row_count(), 3);
        assert!(results.contains(1));
        assert!(!results.contains(2));
        assert!(results.get(2).is_none());
    }

    #[test]
    fn test_collection_into_result_returns_first_failure() {
        let mut collection = Collection::default();
        collection.record_success(1, vec![]);
        collection.record_failure(PageError::Extract {
            page: 5,
            source: ExtractError::TableNotFound { index: 6, found: 0 },
        });
        collection.record_failure(PageError::Fault {
            page: 2,
            message: "boom".to_string(),
        });

        assert!(!collection.is_complete());
        assert_eq!(collection.first_error().unwrap().page(), 5);
        assert_eq!(collection.results().len(), 1);
        let err = collection.into_result().unwrap_err();
        assert_eq!(err.page(), 5);
    }

    #[test]
    fn test_collection_into_result_ok_when_complete() {
        let mut collection = Collection::default();
        collection.record_success(1, vec![vec!["x".to_string()]]);
        assert!(collection.is_complete());
        assert_eq!(collection.into_result().unwrap().len(), 1);
    }
}
