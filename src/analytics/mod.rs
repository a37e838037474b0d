//! Page-view analytics helpers.
//!
//! The analytics backend accepts at most two custom properties per event, so
//! only the original URL and the tenant subdomain are reported. Static assets
//! (images, stylesheets, scripts) are not counted as page views.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::{
    HEADER_CONTENT_TYPE, HEADER_X_ORIGINAL_URL, HTML_CONTENT_TYPE_PREFIX, UNKNOWN_ORIGINAL_URL,
};
use crate::domain::{DomainParser, SplitConfig, SuffixClassifier};
use crate::routing::RequestHead;

/// Custom properties attached to a page-view event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventProperties {
    /// URL the client requested, or `"Unknown"`
    pub original_url: String,
    /// Tenant subdomain, when the host is routable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}

/// Whether `request` is for an HTML page.
///
/// A `content-type` header decides when present. Otherwise the request counts
/// as a page view if its normalized path ends with `.html`, which includes
/// the root (`/index.html`).
pub fn is_html_page<C: SuffixClassifier>(
    request: &RequestHead,
    parser: &DomainParser<C>,
    config: &SplitConfig,
) -> bool {
    if let Some(content_type) = request.header(HEADER_CONTENT_TYPE) {
        return content_type.starts_with(HTML_CONTENT_TYPE_PREFIX);
    }
    parser
        .subdomain_and_path_of(request.url(), config)
        .is_some_and(|parsed| parsed.path.ends_with(".html"))
}

/// Extracts the custom event properties of `request`.
pub fn extract_custom_event_properties<C: SuffixClassifier>(
    request: &RequestHead,
    parser: &DomainParser<C>,
    config: &SplitConfig,
) -> CustomEventProperties {
    CustomEventProperties {
        original_url: request
            .header(HEADER_X_ORIGINAL_URL)
            .filter(|url| !url.is_empty())
            .unwrap_or(UNKNOWN_ORIGINAL_URL)
            .to_string(),
        subdomain: parser
            .subdomain_and_path_of(request.url(), config)
            .map(|parsed| parsed.subdomain),
    }
}

/// Returns the first `n` hex characters of the SHA-256 digest of `input`.
///
/// Used to report URLs without exposing them. `n` larger than the digest
/// returns the full 64 characters.
pub fn generate_hash(input: &str, n: usize) -> String {
    let mut hex = format!("{:x}", Sha256::digest(input.as_bytes()));
    hex.truncate(n);
    hex
}
