//! Rewrite decisions for incoming portal requests.
//!
//! The portal serves every tenant page from its application root and lets the
//! client-side code resolve the resource. This module decides, per request,
//! whether to leave the request alone, serve it at the root as-is, or rewrite
//! it to the root. It also computes the `x-original-url` header value that
//! carries the URL the client actually asked for.

use log::debug;
use url::Url;

use crate::config::{HOST_HEADERS, SERVICE_WORKER_SCRIPT};
use crate::error_handling::RequestError;

/// The parts of an incoming request that routing reads.
#[derive(Debug, Clone)]
pub struct RequestHead {
    url: Url,
    headers: Vec<(String, String)>,
}

impl RequestHead {
    /// Creates a request head for `url` with no headers.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Adds a header. Names are matched case-insensitively.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// The request URL as seen by the server.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// First value of header `name`, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Host the client addressed: `x-forwarded-host`, then `host`.
    ///
    /// An empty header value counts as absent, so an empty
    /// `x-forwarded-host` falls back to `host`.
    pub fn client_host(&self) -> Option<&str> {
        HOST_HEADERS
            .iter()
            .find_map(|name| self.header(name).filter(|host| !host.is_empty()))
    }
}

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    /// Pass the request through untouched (service worker script).
    Bypass,
    /// Already at the root: serve it, tagging the original URL.
    Continue {
        /// Value for the `x-original-url` response header
        original_url: String,
    },
    /// Rewrite to the application root, tagging the original URL.
    RewriteToRoot {
        /// Value for the `x-original-url` response header
        original_url: String,
    },
}

impl RewriteDecision {
    /// The original URL to attach as a header, if any.
    pub fn original_url(&self) -> Option<&str> {
        match self {
            RewriteDecision::Bypass => None,
            RewriteDecision::Continue { original_url }
            | RewriteDecision::RewriteToRoot { original_url } => Some(original_url),
        }
    }

    /// The URL to serve instead of `url`, for rewrites.
    pub fn rewrite_target(&self, url: &Url) -> Option<Url> {
        match self {
            RewriteDecision::RewriteToRoot { .. } => url.join("/").ok(),
            _ => None,
        }
    }
}

/// Reconstructs the URL the client requested, using the forwarded host.
///
/// Query and fragment are not part of the original URL.
///
/// # Errors
///
/// Returns `RequestError::MissingHost` if neither host header is present.
pub fn original_url_of(request: &RequestHead) -> Result<String, RequestError> {
    let host = request.client_host().ok_or(RequestError::MissingHost)?;
    Ok(format!(
        "{}://{}{}",
        request.url().scheme(),
        host,
        request.url().path()
    ))
}

/// Decides how to serve `request`.
///
/// Requests for the service worker script bypass the rewrite, even without a
/// host header. Everything else needs a host to build the original URL.
pub fn decide_rewrite(request: &RequestHead) -> Result<RewriteDecision, RequestError> {
    let path = request.url().path();
    // Checked before the host: the script is served to clients that send no
    // host header at all.
    if path.ends_with(SERVICE_WORKER_SCRIPT) {
        debug!("Bypassing rewrite for service worker script {path}");
        return Ok(RewriteDecision::Bypass);
    }

    let original_url = original_url_of(request)?;
    if path == "/" {
        debug!("Already at root: {original_url}");
        Ok(RewriteDecision::Continue { original_url })
    } else {
        debug!("Rewriting to root: {original_url}");
        Ok(RewriteDecision::RewriteToRoot { original_url })
    }
}
