//! Shared User-Agent string for listing requests.
//!
//! Court listing portals reject obvious non-browser clients, so requests use a
//! desktop browser identity.

/// Browser User-Agent sent with every listing request.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Accept-Language header value sent with every listing request.
pub(crate) const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Default User-Agent for listing requests.
#[must_use]
pub(crate) fn default_listing_user_agent() -> &'static str {
    BROWSER_USER_AGENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_user_agent_looks_like_browser() {
        let ua = default_listing_user_agent();
        assert!(
            ua.starts_with("Mozilla/5.0"),
            "UA must look like a browser: {ua}"
        );
        assert!(
            ua.contains("Chrome/"),
            "UA must carry a browser token: {ua}"
        );
        assert!(!ua.contains('\n'), "UA must be a single header line");
    }
}
