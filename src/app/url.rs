//! URL validation and normalization utilities.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes an input URL.
///
/// Adds an `https://` prefix if the input has no http(s) scheme, then parses
/// it and requires an http/https scheme. Rejects URLs longer than
/// `MAX_URL_LENGTH`. Logs a warning and returns `None` if the URL is invalid,
/// too long, or uses an unsupported scheme.
///
/// Hosts are lowercased and IDNA-encoded by the parser, which is the form the
/// domain parser expects.
pub fn validate_and_normalize_url(url: &str) -> Option<Url> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(parsed),
            _ => {
                warn!("Skipping unsupported scheme for URL: {url}");
                None
            }
        },
        Err(e) => {
            warn!("Skipping invalid URL {url:?}: {e}");
            None
        }
    }
}
