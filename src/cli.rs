//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use court_scraper_core::fetch::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use court_scraper_core::{DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_PAGES_PER_FILE, ScrapeConfig};

/// Scrape paginated court case listings into semicolon-delimited CSV files.
///
/// The tool asks for the listing URL (unless given as an argument), whether
/// to fetch every page or a page range, and a confirmation before it starts.
#[derive(Parser, Debug)]
#[command(name = "court-scraper")]
#[command(author, version, about)]
pub struct Args {
    /// Listing URL; prompted for when omitted
    pub url: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum pages fetched at once (1-10)
    #[arg(short = 'c', long, default_value_t = DEFAULT_MAX_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub concurrency: u8,

    /// Maximum pages written to one range output file (1-100000)
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES_PER_FILE, value_parser = clap::value_parser!(u32).range(1..=100_000))]
    pub pages_per_file: u32,

    /// Directory receiving the output files
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// HTTP connect timeout in seconds (1-600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub connect_timeout: u64,

    /// Whole-request timeout in seconds (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    /// Seconds a faulted page task holds its slot before releasing it (0-600)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(0..=600))]
    pub fault_cooldown: u64,
}

impl Args {
    /// Scrape settings selected by these arguments.
    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig::default()
            .with_max_concurrency(usize::from(self.concurrency))
            .with_max_pages_per_file(self.pages_per_file)
            .with_output_dir(&self.output_dir)
            .with_timeouts(self.connect_timeout, self.read_timeout)
            .with_fault_cooldown(Duration::from_secs(self.fault_cooldown))
    }

    /// Default log level when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["court-scraper"]).unwrap();
        assert!(args.url.is_none());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.concurrency, 3);
        assert_eq!(args.pages_per_file, 1000);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.connect_timeout, 30);
        assert_eq!(args.read_timeout, 60);
        assert_eq!(args.fault_cooldown, 30);
    }

    #[test]
    fn test_cli_positional_url() {
        let args = Args::try_parse_from([
            "court-scraper",
            "https://court.example/modules.php?name=sud_delo",
        ])
        .unwrap();
        assert_eq!(
            args.url.as_deref(),
            Some("https://court.example/modules.php?name=sud_delo")
        );
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["court-scraper", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);
        assert_eq!(args.default_log_level(), "debug");

        let args = Args::try_parse_from(["court-scraper", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.default_log_level(), "trace");
    }

    #[test]
    fn test_cli_quiet_wins_over_verbose() {
        let args = Args::try_parse_from(["court-scraper", "-q", "-vv"]).unwrap();
        assert!(args.quiet);
        assert_eq!(args.default_log_level(), "error");
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["court-scraper", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["court-scraper", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_concurrency_bounds() {
        let args = Args::try_parse_from(["court-scraper", "-c", "10"]).unwrap();
        assert_eq!(args.concurrency, 10);
        let args = Args::try_parse_from(["court-scraper", "--concurrency", "1"]).unwrap();
        assert_eq!(args.concurrency, 1);

        for value in ["0", "11"] {
            let err = Args::try_parse_from(["court-scraper", "-c", value]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_cli_pages_per_file_zero_rejected() {
        let err = Args::try_parse_from(["court-scraper", "--pages-per-file", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_scrape_config_reflects_flags() {
        let args = Args::try_parse_from([
            "court-scraper",
            "-c",
            "5",
            "--pages-per-file",
            "250",
            "-o",
            "/tmp/out",
            "--connect-timeout",
            "5",
            "--read-timeout",
            "20",
            "--fault-cooldown",
            "0",
        ])
        .unwrap();
        let config = args.scrape_config();
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.max_pages_per_file, 250);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.read_timeout_secs, 20);
        assert_eq!(config.fault_cooldown, Duration::ZERO);
    }
}
