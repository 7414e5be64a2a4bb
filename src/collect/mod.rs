//! Concurrent paginated retrieval.
//!
//! - [`required_pages`] - page count from pagination metadata
//! - [`PageFetchTask`] - fetch and extract one page
//! - [`PageCollector`] - run page tasks under a concurrency cap and gather
//!   their rows into a [`ResultSet`]

mod collector;
mod counter;
mod error;
pub mod page_url;
mod task;

pub use collector::{
    Collection, DEFAULT_FAULT_COOLDOWN, DEFAULT_MAX_CONCURRENCY, PageCollector, ProgressReporter,
    ResultSet,
};
pub use counter::{CountError, required_pages};
pub use error::{CollectError, PageError};
pub use task::PageFetchTask;
