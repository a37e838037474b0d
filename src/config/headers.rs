//! HTTP header name constants.
//!
//! This module defines the request and response headers read or written by
//! the rewrite and analytics layers. Names are lowercase; lookups are
//! case-insensitive.

// Request headers identifying the original host
/// Host forwarded by a reverse proxy; preferred over `host`
pub const HEADER_X_FORWARDED_HOST: &str = "x-forwarded-host";
/// Host header of the request
pub const HEADER_HOST: &str = "host";

/// Headers consulted, in order, to recover the host the client asked for.
pub const HOST_HEADERS: &[&str] = &[HEADER_X_FORWARDED_HOST, HEADER_HOST];

// Headers carried between the rewrite layer and analytics
/// URL the client requested before any rewrite to the application root
pub const HEADER_X_ORIGINAL_URL: &str = "x-original-url";
/// Content-Type of the request, used to detect page views
pub const HEADER_CONTENT_TYPE: &str = "content-type";
