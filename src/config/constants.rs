//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including routing conventions, input limits, and analytics defaults.

/// Resource key substituted for the root path.
/// Content-addressed storage has no directory entries, so `/` is served from here.
pub const INDEX_DOCUMENT_PATH: &str = "/index.html";

/// Path suffix of the portal's service worker script.
/// Requests for it bypass the rewrite to the application root.
pub const SERVICE_WORKER_SCRIPT: &str = "walrus-sites-sw.js";

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default number of hex characters kept by `generate_hash`.
pub const DEFAULT_HASH_LENGTH: usize = 10;

/// Placeholder for a missing original URL in analytics events.
pub const UNKNOWN_ORIGINAL_URL: &str = "Unknown";

/// Content-Type prefix that marks a page view.
pub const HTML_CONTENT_TYPE_PREFIX: &str = "text/html";
