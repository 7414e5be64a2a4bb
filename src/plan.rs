//! Page numbering and request plans.
//!
//! A [`RequestPlan`] is the validated, inclusive page range a single run
//! fetches. It is computed once per invocation and never persisted.

use std::ops::RangeInclusive;

use thiserror::Error;

/// 1-based page number within a listing.
pub type PageNumber = u32;

/// Errors caused by invalid user input.
///
/// These are fatal to a run and are always raised before any network
/// activity takes place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Start page is after the end page, or one of them is zero.
    #[error("invalid page range {start}-{end}: pages are 1-based and start must not exceed end")]
    InvalidRange {
        /// Requested first page.
        start: PageNumber,
        /// Requested last page.
        end: PageNumber,
    },

    /// The listing reported zero pages, so there is nothing to fetch.
    #[error("listing has no pages to fetch")]
    EmptyListing,

    /// Mode selection was not one of the offered choices.
    #[error("unknown mode '{0}': expected 1 (all pages) or 2 (page range)")]
    InvalidMode(String),

    /// A numeric answer could not be parsed.
    #[error("expected a number, got '{0}'")]
    NotANumber(String),

    /// The target address is empty or malformed.
    #[error("invalid listing URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The user declined the confirmation prompt.
    #[error("operation cancelled by user")]
    Cancelled,

    /// Input ended while a prompt was still waiting for an answer.
    #[error("input ended before {0} was provided")]
    UnexpectedEof(&'static str),
}

/// Inclusive page range for one scraping run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPlan {
    start: PageNumber,
    end: PageNumber,
}

impl RequestPlan {
    /// Creates a plan for pages `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidRange`] if `start` is zero or greater
    /// than `end`.
    pub fn new(start: PageNumber, end: PageNumber) -> Result<Self, InputError> {
        if start == 0 || start > end {
            return Err(InputError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the default-mode plan covering pages `1..=page_count`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyListing`] if `page_count` is zero.
    pub fn all(page_count: PageNumber) -> Result<Self, InputError> {
        if page_count == 0 {
            return Err(InputError::EmptyListing);
        }
        Ok(Self {
            start: 1,
            end: page_count,
        })
    }

    /// First page of the plan.
    #[must_use]
    pub fn start(&self) -> PageNumber {
        self.start
    }

    /// Last page of the plan (inclusive).
    #[must_use]
    pub fn end(&self) -> PageNumber {
        self.end
    }

    /// Number of requests the plan will issue.
    #[must_use]
    pub fn request_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Iterates the planned pages in ascending order.
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<PageNumber> {
        self.start..=self.end
    }
}
