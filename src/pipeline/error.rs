//! Error type returned by the scraping facade.

use thiserror::Error;

use crate::collect::{CollectError, CountError, PageError};
use crate::extract::ExtractError;
use crate::fetch::FetchError;
use crate::output::OutputError;
use crate::plan::InputError;

/// Any failure of a [`ListingScraper`](super::ListingScraper) operation.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The requested range or listing was invalid.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The page count could not be computed.
    #[error(transparent)]
    Count(#[from] CountError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(FetchError),

    /// The summary page could not be fetched.
    #[error("failed to fetch listing summary: {0}")]
    Fetch(#[from] FetchError),

    /// The summary page did not carry usable pagination.
    #[error("failed to read listing summary: {0}")]
    Extract(#[from] ExtractError),

    /// The collector could not be built or run.
    #[error(transparent)]
    Collect(#[from] CollectError),

    /// At least one page failed; nothing was written.
    #[error("{failed} page(s) failed, no output written; first failure: {first}")]
    Aggregate {
        /// Number of pages that failed.
        failed: usize,
        /// First failure observed.
        #[source]
        first: PageError,
    },

    /// An output file could not be written.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ScrapeError {
    /// Creates an aggregate error from the failures of a collection run.
    ///
    /// Returns `None` when `failures` is empty.
    pub(crate) fn aggregate(failures: Vec<PageError>) -> Option<Self> {
        let failed = failures.len();
        failures
            .into_iter()
            .next()
            .map(|first| Self::Aggregate { failed, first })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_keeps_first_failure() {
        let err = ScrapeError::aggregate(vec![
            PageError::Fault {
                page: 4,
                message: "boom".to_string(),
            },
            PageError::Fault {
                page: 1,
                message: "later".to_string(),
            },
        ])
        .unwrap();

        let msg = err.to_string();
        assert!(msg.starts_with("2 page(s) failed"));
        assert!(msg.contains("page 4 task faulted: boom"));
        assert!(matches!(
            err,
            ScrapeError::Aggregate {
                failed: 2,
                first: PageError::Fault { page: 4, .. }
            }
        ));
    }

    #[test]
    fn test_aggregate_of_nothing_is_none() {
        assert!(ScrapeError::aggregate(Vec::new()).is_none());
    }

    #[test]
    fn test_client_error_is_not_reported_as_summary_failure() {
        let err = ScrapeError::Client(FetchError::invalid_url("proxy", "bad proxy URL"));
        let msg = err.to_string();
        assert!(!msg.contains("listing summary"));
        assert!(msg.contains("bad proxy URL"));

        let err = ScrapeError::from(FetchError::http_status("https://court.example", 503));
        assert!(matches!(err, ScrapeError::Fetch(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("failed to fetch listing summary"));
    }

    #[test]
    fn test_input_error_is_transparent() {
        let err = ScrapeError::from(InputError::EmptyListing);
        assert_eq!(err.to_string(), InputError::EmptyListing.to_string());
    }
}
