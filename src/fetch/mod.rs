//! HTTP fetching of listing pages.
//!
//! The [`PageFetcher`] trait is the seam the collector depends on; the
//! [`HttpPageFetcher`] implementation performs the real network I/O.
//!
//! # Features
//!
//! - Configurable timeouts (30s connect, 60s total by default)
//! - Transparent gzip/deflate/brotli decompression
//! - `windows-1251` and `utf-8` charset decoding, other charsets rejected
//! - Inline `style` attributes stripped before extraction
//!
//! # Example
//!
//! ```no_run
//! use court_scraper_core::fetch::{HttpPageFetcher, PageFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpPageFetcher::new()?;
//! let html = fetcher
//!     .fetch_page("https://court.example/modules.php?name=sud_delo&op=rs")
//!     .await?;
//! println!("fetched {} bytes", html.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;

pub use client::HttpPageFetcher;
pub use error::FetchError;

use async_trait::async_trait;

/// Source of raw listing page content.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the collector can hold an
/// `Arc<dyn PageFetcher>` and tests can substitute stub fetchers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url` and returns its decoded HTML.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}
