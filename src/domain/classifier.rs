//! Hostname classification against the Public Suffix List.
//!
//! A [`SuffixClassifier`] sorts a hostname into exactly one of three kinds:
//! a host under a known public suffix, a special-use host (loopback names,
//! reserved test names, IP literals), or anything else.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use psl::Psl;

/// Top-level labels reserved for special use (RFC 2606, RFC 6761, RFC 6762).
pub const RESERVED_TOP_LEVEL_DOMAINS: &[&str] = &["localhost", "local", "example", "invalid", "test"];

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// Classification of a hostname.
///
/// All label slices borrow from the classified hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClassification<'a> {
    /// The hostname ends with a known public suffix.
    Listed {
        /// The full hostname that was classified
        hostname: &'a str,
        /// Labels left of the registrable label, in hostname order
        sub_domains: Vec<&'a str>,
        /// The registrable label, absent when the hostname is itself a public suffix
        domain: Option<&'a str>,
        /// Labels of the public suffix, in hostname order
        top_level_domains: Vec<&'a str>,
    },
    /// A special-use host: reserved name or IP literal.
    Reserved {
        /// The full hostname that was classified
        hostname: &'a str,
        /// Labels of the host; an IP literal is a single label
        labels: Vec<&'a str>,
    },
    /// Unparseable host or unknown suffix.
    Other,
}

impl HostClassification<'_> {
    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HostClassification::Listed { .. } => "listed",
            HostClassification::Reserved { .. } => "reserved",
            HostClassification::Other => "other",
        }
    }
}

/// Classifies hostnames for domain extraction.
///
/// Implementations must be pure lookups: they are shared read-only across
/// request workers for the lifetime of the process.
pub trait SuffixClassifier: Send + Sync {
    /// Classify `hostname`, borrowing labels from it.
    fn classify<'a>(&self, hostname: &'a str) -> HostClassification<'a>;
}

impl<C: SuffixClassifier + ?Sized> SuffixClassifier for &C {
    fn classify<'a>(&self, hostname: &'a str) -> HostClassification<'a> {
        (**self).classify(hostname)
    }
}

impl<C: SuffixClassifier + ?Sized> SuffixClassifier for Arc<C> {
    fn classify<'a>(&self, hostname: &'a str) -> HostClassification<'a> {
        (**self).classify(hostname)
    }
}

/// [`SuffixClassifier`] backed by the compiled-in list of the `psl` crate.
///
/// Both the ICANN and private sections of the list are consulted. Matching is
/// case-insensitive; labels in the result keep the case of the input. Lookups
/// allocate only the returned label vectors, plus a lowercased copy for
/// mixed-case hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PslClassifier;

impl PslClassifier {
    /// Creates a classifier over the bundled Public Suffix List.
    pub fn new() -> Self {
        PslClassifier
    }
}

impl SuffixClassifier for PslClassifier {
    fn classify<'a>(&self, hostname: &'a str) -> HostClassification<'a> {
        if is_ip_literal(hostname) {
            return HostClassification::Reserved {
                hostname,
                labels: vec![hostname],
            };
        }

        if !is_valid_hostname(hostname) {
            return HostClassification::Other;
        }

        let is_reserved = hostname
            .rsplit('.')
            .next()
            .is_some_and(|tld| {
                RESERVED_TOP_LEVEL_DOMAINS
                    .iter()
                    .any(|reserved| tld.eq_ignore_ascii_case(reserved))
            });
        if is_reserved {
            return HostClassification::Reserved {
                hostname,
                labels: hostname.split('.').collect(),
            };
        }

        // The list only holds lowercase rules. Valid hostnames are ASCII, so
        // lowercasing keeps byte offsets and the suffix length maps back onto
        // `hostname`.
        let lowered;
        let lookup = if hostname.bytes().any(|b| b.is_ascii_uppercase()) {
            lowered = hostname.to_ascii_lowercase();
            lowered.as_str()
        } else {
            hostname
        };
        let suffix_len = match psl::List.suffix(lookup.as_bytes()) {
            Some(suffix) if suffix.is_known() => suffix.as_bytes().len(),
            _ => return HostClassification::Other,
        };

        let cut = hostname.len() - suffix_len.min(hostname.len());
        let rest = if cut == 0 {
            ""
        } else {
            match hostname[..cut].strip_suffix('.') {
                Some(rest) => rest,
                None => return HostClassification::Other,
            }
        };
        let (sub_domains, domain) = match rest.rsplit_once('.') {
            Some((subs, domain)) => (subs.split('.').collect(), Some(domain)),
            None if rest.is_empty() => (Vec::new(), None),
            None => (Vec::new(), Some(rest)),
        };

        HostClassification::Listed {
            hostname,
            sub_domains,
            domain,
            top_level_domains: hostname[cut..].split('.').collect(),
        }
    }
}

/// Returns true for IPv4 literals and IPv6 literals with or without brackets.
fn is_ip_literal(host: &str) -> bool {
    let unbracketed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    host.parse::<Ipv4Addr>().is_ok() || unbracketed.parse::<Ipv6Addr>().is_ok()
}

/// Checks RFC 1123 hostname shape: non-empty labels of at most 63 ASCII
/// alphanumerics, hyphens or underscores, not starting or ending with a hyphen.
fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LENGTH {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    })
}
