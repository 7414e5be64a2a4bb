//! Interactive questions asked before a scrape starts.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use court_scraper_core::{InputError, PageNumber, RequestPlan};
use thiserror::Error;
use url::Url;

/// Failure while asking a question.
#[derive(Debug, Error)]
pub(crate) enum PromptError {
    /// The answer was invalid or the user cancelled.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Reading the answer or writing the question failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Which pages the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Every page of the listing.
    AllPages,
    /// An explicit inclusive page range.
    Range,
}

/// Asks questions on `output` and reads whitespace-separated answers from
/// `input`.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Prints a line of information.
    pub(crate) fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Asks for the listing URL. The whole line is the answer.
    pub(crate) fn url(&mut self) -> Result<String, PromptError> {
        self.ask("Enter listing URL: ")?;
        let line = self.read_line("the listing URL")?;
        Ok(parse_listing_url(&line)?)
    }

    /// Asks whether to fetch every page or a range.
    pub(crate) fn mode(&mut self) -> Result<Mode, PromptError> {
        self.ask("Fetch all pages or a page range? 1 - all, 2 - range: ")?;
        match self.next_token("the mode")?.as_str() {
            "1" => Ok(Mode::AllPages),
            "2" => Ok(Mode::Range),
            other => Err(InputError::InvalidMode(other.to_string()).into()),
        }
    }

    /// Asks for the first and last page of a range.
    pub(crate) fn range(&mut self) -> Result<RequestPlan, PromptError> {
        self.ask("Enter page range (start end): ")?;
        let start = self.page("the start page")?;
        let end = self.page("the end page")?;
        Ok(RequestPlan::new(start, end)?)
    }

    /// Shows the request count and asks for confirmation. Any answer other
    /// than `1` cancels.
    pub(crate) fn confirm(&mut self, request_count: u32) -> Result<(), PromptError> {
        writeln!(self.output, "Requests to send: {request_count}")?;
        self.ask("Continue? 1 - yes, 2 - no: ")?;
        if self.next_token("the confirmation")? == "1" {
            Ok(())
        } else {
            Err(InputError::Cancelled.into())
        }
    }

    fn page(&mut self, what: &'static str) -> Result<PageNumber, PromptError> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| PromptError::from(InputError::NotANumber(token)))
    }

    fn ask(&mut self, question: &str) -> Result<(), PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self, what: &'static str) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::UnexpectedEof(what).into());
        }
        Ok(line.trim().to_string())
    }

    fn next_token(&mut self, what: &'static str) -> Result<String, PromptError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let line = self.read_line(what)?;
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// Validates a listing URL given on the command line or at the prompt.
pub(crate) fn parse_listing_url(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::InvalidUrl {
            url: raw.to_string(),
            reason: "no URL given".to_string(),
        });
    }
    let parsed = Url::parse(trimmed).map_err(|e| InputError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(InputError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}
