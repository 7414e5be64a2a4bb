//! Per-page address derivation.

use url::Url;

use crate::fetch::FetchError;
use crate::plan::PageNumber;

/// Path marker preceding the listing query on court portals. Everything
/// before it is the host prefix that relative document links resolve against.
pub const DEFAULT_BASE_PATH_MARKER: &str = "/modules.php";

const PAGE_PARAM: &str = "page";

/// Builds the address of `page` by replacing the `page` query parameter of
/// `base_url`, or inserting it as the first parameter.
///
/// Other parameters keep their raw encoding, since portals often expect
/// `windows-1251` percent-escapes that a decode/re-encode cycle would corrupt.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `base_url` is not an absolute URL.
pub fn page_url(base_url: &str, page: PageNumber) -> Result<String, FetchError> {
    let clean = clean(base_url);
    let mut url = Url::parse(&clean).map_err(|e| FetchError::invalid_url(&clean, e.to_string()))?;

    let page_pair = format!("{PAGE_PARAM}={page}");
    let query = match url.query().filter(|q| !q.is_empty()) {
        Some(existing) => {
            let mut replaced = false;
            let pairs: Vec<&str> = existing
                .split('&')
                .map(|pair| {
                    if is_page_pair(pair) {
                        replaced = true;
                        page_pair.as_str()
                    } else {
                        pair
                    }
                })
                .collect();
            if replaced {
                pairs.join("&")
            } else {
                format!("{page_pair}&{existing}")
            }
        }
        None => page_pair.clone(),
    };

    url.set_query(Some(&query));
    Ok(url.into())
}

/// Returns the URL prefix preceding `marker`, or the URL origin when the
/// marker is absent.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if the marker is absent and `base_url`
/// cannot be parsed.
pub fn base_host(base_url: &str, marker: &str) -> Result<String, FetchError> {
    let clean = clean(base_url);
    if !marker.is_empty()
        && let Some((prefix, _)) = clean.split_once(marker)
    {
        return Ok(prefix.to_string());
    }

    let url = Url::parse(&clean).map_err(|e| FetchError::invalid_url(&clean, e.to_string()))?;
    Ok(url.origin().ascii_serialization())
}

fn is_page_pair(pair: &str) -> bool {
    let name = pair.split_once('=').map_or(pair, |(name, _)| name);
    name == PAGE_PARAM
}

fn clean(url: &str) -> String {
    url.trim().replace(['\r', '\n'], "")
}
