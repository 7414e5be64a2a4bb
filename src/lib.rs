//! Court Scraper Core Library
//!
//! This library retrieves paginated court case listings over HTTP and
//! materializes them as semicolon-delimited CSV files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`plan`] - Page numbers, request plans and input validation errors
//! - [`fetch`] - HTTP page fetching with charset handling
//! - [`extract`] - Row and pagination extraction from listing HTML
//! - [`collect`] - Request counting and the concurrent page collector
//! - [`output`] - Chunk planning and CSV writers
//! - [`pipeline`] - The [`ListingScraper`] facade tying everything together
//! - [`config`] - Runtime settings shared by the components

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collect;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod plan;
mod user_agent;

// Re-export commonly used types
pub use collect::{
    CollectError, Collection, CountError, DEFAULT_MAX_CONCURRENCY, PageCollector, PageError,
    ProgressReporter, ResultSet, required_pages,
};
pub use config::ScrapeConfig;
pub use extract::{
    ExtractError, HtmlPaginationExtractor, HtmlTableExtractor, PaginationExtractor,
    PaginationInfo, Row, RowExtractor,
};
pub use fetch::{FetchError, HttpPageFetcher, PageFetcher};
pub use output::{
    DEFAULT_MAX_PAGES_PER_FILE, OutputChunk, OutputError, OutputSettings, RangeFileWriter,
    SequentialFileWriter, default_header, plan_chunks,
};
pub use pipeline::{ListingScraper, ScrapeError};
pub use plan::{InputError, PageNumber, RequestPlan};
