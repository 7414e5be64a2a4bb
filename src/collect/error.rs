//! Error types for page collection.

use thiserror::Error;

use super::collector::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use crate::extract::ExtractError;
use crate::fetch::FetchError;
use crate::plan::PageNumber;

/// Failure of a single page task. Always tagged with the page number.
#[derive(Debug, Error)]
pub enum PageError {
    /// The page could not be fetched.
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        /// Page that failed.
        page: PageNumber,
        /// Underlying transport error.
        #[source]
        source: FetchError,
    },

    /// The page was fetched but its rows could not be extracted.
    #[error("failed to extract rows from page {page}: {source}")]
    Extract {
        /// Page that failed.
        page: PageNumber,
        /// Underlying extraction error.
        #[source]
        source: ExtractError,
    },

    /// The page task panicked; the panic was caught at the task boundary.
    #[error("page {page} task faulted: {message}")]
    Fault {
        /// Page whose task faulted.
        page: PageNumber,
        /// Panic payload rendered as text.
        message: String,
    },
}

impl PageError {
    /// Returns the page this error belongs to.
    #[must_use]
    pub fn page(&self) -> PageNumber {
        match self {
            Self::Fetch { page, .. } | Self::Extract { page, .. } | Self::Fault { page, .. } => {
                *page
            }
        }
    }

    /// Creates a fault error from a caught panic payload.
    #[must_use]
    pub fn fault(page: PageNumber, payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Fault { page, message }
    }
}

/// Error type for collector construction and operation.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_reports_page() {
        let error = PageError::Extract {
            page: 12,
            source: ExtractError::TableNotFound { index: 6, found: 0 },
        };
        assert_eq!(error.page(), 12);
        assert!(error.to_string().contains("page 12"));
    }

    #[test]
    fn test_fault_from_str_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        let error = PageError::fault(4, payload.as_ref());
        assert_eq!(error.to_string(), "page 4 task faulted: boom");
    }

    #[test]
    fn test_fault_from_string_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("index out of range"));
        let error = PageError::fault(9, payload.as_ref());
        assert!(matches!(
            error,
            PageError::Fault { page: 9, ref message } if message == "index out of range"
        ));
    }

    #[test]
    fn test_invalid_concurrency_display() {
        let msg = CollectError::InvalidConcurrency { value: 0 }.to_string();
        assert!(msg.contains("invalid concurrency"));
        assert!(msg.contains("between 1 and 10"));
    }
}
