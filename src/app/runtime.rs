//! One interactive scraping session.

use std::fs;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use court_scraper_core::{ListingScraper, ProgressReporter};
use tracing::{debug, info};

use super::progress::{PageProgress, should_show_progress};
use super::prompt::{Mode, Prompter, parse_listing_url};
use crate::cli::Args;

/// Runs the session on the process terminal.
pub(crate) async fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let scraper = ListingScraper::new(args.scrape_config())?;
    let mut prompter = Prompter::new(BufReader::new(io::stdin()), io::stdout());
    let show_progress = should_show_progress(io::stderr().is_terminal(), args.quiet);
    run_session(args.url.as_deref(), scraper, &mut prompter, show_progress).await
}

/// Asks for the URL, mode, range and confirmation, then scrapes.
///
/// Nothing but the listing summary (in all-pages mode) is requested before
/// the user confirms.
pub(crate) async fn run_session<R: BufRead, W: Write>(
    url: Option<&str>,
    scraper: ListingScraper,
    prompter: &mut Prompter<R, W>,
    show_progress: bool,
) -> Result<Vec<PathBuf>> {
    let url = match url {
        Some(raw) => parse_listing_url(raw)?,
        None => prompter.url()?,
    };
    let mode = prompter.mode()?;
    debug!(url = %url, ?mode, "session input read");

    let (plan, page_count) = match mode {
        Mode::AllPages => {
            prompter.say("Counting required requests...")?;
            let page_count = scraper.request_count(&url).await?;
            (None, page_count)
        }
        Mode::Range => {
            let plan = prompter.range()?;
            (Some(plan), plan.request_count())
        }
    };
    prompter.confirm(page_count)?;

    let output_dir = &scraper.config().output_dir;
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
        info!(dir = %output_dir.display(), "created output directory");
    }

    let progress = Arc::new(PageProgress::new(page_count, show_progress));
    let reporter: Arc<dyn ProgressReporter> = progress.clone();
    let scraper = scraper.with_progress(reporter);
    let outcome = match plan {
        None => scraper
            .scrape_all(&url, page_count)
            .await
            .map(|path| vec![path]),
        Some(plan) => scraper.scrape_range(&url, plan).await,
    };
    progress.finish();

    let files = outcome?;
    for file in &files {
        prompter.say(&format!("Wrote {}", file.display()))?;
    }
    prompter.say("Scraping finished.")?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use court_scraper_core::{
        ExtractError, FetchError, InputError, PageFetcher, PaginationExtractor, PaginationInfo,
        Row, RowExtractor, ScrapeConfig,
    };
    use tempfile::TempDir;

    use super::*;

    const LISTING: &str = "https://court.example/modules.php?name=sud_delo&op=rs";

    #[derive(Default)]
    struct RecordingFetcher {
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for RecordingFetcher {
        async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(url.to_string())
        }
    }

    struct UrlRow;

    impl RowExtractor for UrlRow {
        fn extract_rows(&self, _base_host: &str, html: &str) -> Result<Vec<Row>, ExtractError> {
            Ok(vec![vec![html.to_string()]])
        }
    }

    struct TwoPages;

    impl PaginationExtractor for TwoPages {
        fn extract_pagination(&self, _html: &str) -> Result<PaginationInfo, ExtractError> {
            Ok(PaginationInfo {
                total_elements: 40,
                per_page: 20,
            })
        }
    }

    fn scraper(fetcher: Arc<RecordingFetcher>, dir: &std::path::Path) -> ListingScraper {
        ListingScraper::with_components(
            fetcher,
            Arc::new(UrlRow),
            Arc::new(TwoPages),
            ScrapeConfig::default()
                .with_output_dir(dir)
                .with_fault_cooldown(Duration::ZERO),
        )
    }

    #[tokio::test]
    async fn test_cancelled_range_sends_no_requests() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(RecordingFetcher::default());
        let mut prompter = Prompter::new("2\n1 3\n2\n".as_bytes(), Vec::new());
        let listing = scraper(fetcher.clone(), dir.path());

        let err = run_session(Some(LISTING), listing, &mut prompter, false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), InputError::Cancelled.to_string());
        assert!(fetcher.requested.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_range_session_writes_range_file() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(RecordingFetcher::default());
        let input = format!("{LISTING}\n2\n2 3\n1\n");
        let mut prompter = Prompter::new(input.as_bytes(), Vec::new());
        let listing = scraper(fetcher.clone(), dir.path());

        let files = run_session(None, listing, &mut prompter, false)
            .await
            .unwrap();

        assert_eq!(files, vec![dir.path().join("output_2-3.csv")]);
        assert_eq!(fetcher.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_all_pages_session_counts_then_writes_output_csv() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested");
        let fetcher = Arc::new(RecordingFetcher::default());
        let mut prompter = Prompter::new("1\n1\n".as_bytes(), Vec::new());
        let listing = scraper(fetcher.clone(), &out);

        let files = run_session(Some(LISTING), listing, &mut prompter, false)
            .await
            .unwrap();

        assert_eq!(files, vec![out.join("output.csv")]);
        let requested = fetcher.requested.lock().unwrap();
        assert_eq!(requested[0], LISTING);
        assert_eq!(requested.len(), 3);
    }
}
