//! Constants for the fetch module (timeouts, accepted charsets).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default total request timeout (60 seconds). Listing pages are small, so a
/// stalled response is treated as a failure for that page.
pub const READ_TIMEOUT_SECS: u64 = 60;

/// Charsets the listing pages are known to be served in.
pub const SUPPORTED_CHARSETS: [&str; 2] = ["utf-8", "windows-1251"];
