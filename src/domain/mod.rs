//! Domain extraction for portal routing.
//!
//! This module splits the hostname of an incoming URL into the portal's own
//! base domain and the tenant-identifying subdomain, and normalizes the path
//! into the key of a content-addressed resource.
//!
//! Key functions:
//! - `DomainParser::extract()` - Computes the full routing key of a URL
//! - `DomainParser::domain_of()` - Only the portal domain
//! - `DomainParser::subdomain_and_path_of()` - Only the tenant subdomain and path
//! - `normalize_path()` - Maps `/` to `/index.html` and drops trailing slashes
//!
//! Two split strategies exist for hosts under a listed public suffix. With a
//! fixed portal domain length, the last `L` characters of the hostname are the
//! portal domain. Without one, the registrable domain reported by the Public
//! Suffix List is the portal domain.

pub mod classifier;
pub mod observer;

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;
use url::Url;

use crate::config::INDEX_DOCUMENT_PATH;
use crate::error_handling::{NotRoutable, RouteOutcome};

pub use classifier::{HostClassification, PslClassifier, SuffixClassifier};
pub use observer::{ExtractionObserver, LogObserver, NoopObserver};

/// How the portal domain was separated from the subdomain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Listed host cut at the configured portal domain length
    FixedSuffix,
    /// Listed host cut at the registrable domain
    PublicSuffix,
    /// Reserved host cut before its last label
    Reserved,
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SplitStrategy::FixedSuffix => "fixed_suffix",
            SplitStrategy::PublicSuffix => "public_suffix",
            SplitStrategy::Reserved => "reserved",
        })
    }
}

/// Deployment settings for splitting hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitConfig {
    /// Number of trailing hostname characters that form the portal domain
    /// (e.g. 11 for `walrus.site`). `None` selects the Public Suffix List.
    pub portal_fixed_suffix_length: Option<NonZeroUsize>,
}

impl SplitConfig {
    /// Split listed hosts using the Public Suffix List.
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// Split listed hosts at a fixed portal domain length. A length of 0 is
    /// treated as unset.
    pub fn fixed(portal_domain_length: usize) -> Self {
        Self {
            portal_fixed_suffix_length: NonZeroUsize::new(portal_domain_length),
        }
    }
}

/// The routing key of a routable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingKey {
    /// The portal's base domain, e.g. `walrus.site`
    pub domain: String,
    /// The tenant subdomain, possibly empty
    pub subdomain: String,
    /// Normalized resource path
    pub path: String,
    /// Strategy that produced the split
    pub strategy: SplitStrategy,
}

/// Tenant subdomain and resource path of a routable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainAndPath {
    /// The tenant subdomain, possibly empty
    pub subdomain: String,
    /// Normalized resource path
    pub path: String,
}

/// Result of domain extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The URL maps to a tenant resource.
    Routable(RoutingKey),
    /// The host cannot be routed; callers apply their own fallback.
    NotRoutable(NotRoutable),
}

impl Extraction {
    /// The routing key, if routable.
    pub fn routing_key(&self) -> Option<&RoutingKey> {
        match self {
            Extraction::Routable(key) => Some(key),
            Extraction::NotRoutable(_) => None,
        }
    }

    /// Converts into a `Result`, with the not-routable reason as the error.
    pub fn into_result(self) -> Result<RoutingKey, NotRoutable> {
        match self {
            Extraction::Routable(key) => Ok(key),
            Extraction::NotRoutable(reason) => Err(reason),
        }
    }

    /// The portal domain, if routable.
    pub fn domain(&self) -> Option<&str> {
        self.routing_key().map(|key| key.domain.as_str())
    }

    /// Whether a routing key was produced.
    pub fn is_routable(&self) -> bool {
        matches!(self, Extraction::Routable(_))
    }

    /// Statistics category of this result.
    pub fn outcome(&self) -> RouteOutcome {
        match self {
            Extraction::Routable(key) => match key.strategy {
                SplitStrategy::FixedSuffix => RouteOutcome::ListedFixed,
                SplitStrategy::PublicSuffix => RouteOutcome::ListedDynamic,
                SplitStrategy::Reserved => RouteOutcome::Reserved,
            },
            Extraction::NotRoutable(reason) => RouteOutcome::from(reason),
        }
    }
}

/// Splits URLs into routing keys using a [`SuffixClassifier`].
///
/// The parser holds no mutable state. A single instance can be shared across
/// request workers (`Arc<DomainParser>`), and every call is independent.
#[derive(Debug, Clone, Default)]
pub struct DomainParser<C = PslClassifier> {
    classifier: C,
}

impl<C: SuffixClassifier> DomainParser<C> {
    /// Creates a parser over the given classifier.
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Computes the routing key of `url`.
    ///
    /// Never fails loudly: unclassifiable hosts and hosts that violate the
    /// fixed-length precondition yield [`Extraction::NotRoutable`].
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_router::domain::{DomainParser, SplitConfig};
    /// use url::Url;
    ///
    /// let parser: DomainParser = DomainParser::default();
    /// let url = Url::parse("https://flatland.walrus.site/").unwrap();
    /// let key = parser.extract(&url, &SplitConfig::fixed(11)).into_result().unwrap();
    /// assert_eq!(key.domain, "walrus.site");
    /// assert_eq!(key.subdomain, "flatland");
    /// assert_eq!(key.path, "/index.html");
    /// ```
    pub fn extract(&self, url: &Url, config: &SplitConfig) -> Extraction {
        self.extract_with(url, config, &NoopObserver)
    }

    /// Like [`extract`](Self::extract), reporting checkpoints to `observer`.
    pub fn extract_with<O: ExtractionObserver + ?Sized>(
        &self,
        url: &Url,
        config: &SplitConfig,
        observer: &O,
    ) -> Extraction {
        self.extract_parts_with(url.host_str().unwrap_or_default(), url.path(), config, observer)
    }

    /// Computes the routing key from an already separated hostname and path.
    pub fn extract_parts_with<O: ExtractionObserver + ?Sized>(
        &self,
        hostname: &str,
        pathname: &str,
        config: &SplitConfig,
        observer: &O,
    ) -> Extraction {
        let classification = self.classifier.classify(hostname);
        observer.classified(hostname, &classification);

        let split = match &classification {
            HostClassification::Listed {
                hostname: listed,
                sub_domains,
                domain,
                top_level_domains,
            } => match config.portal_fixed_suffix_length {
                Some(length) => split_fixed(listed, length),
                None => split_dynamic(sub_domains, *domain, top_level_domains),
            },
            HostClassification::Reserved { labels, .. } => split_reserved(labels),
            HostClassification::Other => Err(NotRoutable::Unclassified),
        };

        match split {
            Ok((domain, subdomain, strategy)) => {
                let key = RoutingKey {
                    domain,
                    subdomain,
                    path: normalize_path(pathname).to_string(),
                    strategy,
                };
                observer.split(hostname, &key);
                Extraction::Routable(key)
            }
            Err(reason) => {
                observer.not_routable(hostname, &reason);
                Extraction::NotRoutable(reason)
            }
        }
    }

    /// Returns only the portal domain of `url`, if routable.
    pub fn domain_of(&self, url: &Url, config: &SplitConfig) -> Option<String> {
        self.extract(url, config)
            .into_result()
            .ok()
            .map(|key| key.domain)
    }

    /// Returns only the subdomain and normalized path of `url`, if routable.
    pub fn subdomain_and_path_of(&self, url: &Url, config: &SplitConfig) -> Option<SubdomainAndPath> {
        self.extract(url, config)
            .into_result()
            .ok()
            .map(|key| SubdomainAndPath {
                subdomain: key.subdomain,
                path: key.path,
            })
    }
}

type Split = Result<(String, String, SplitStrategy), NotRoutable>;

/// Keeps the last `length` characters as the domain. The character before
/// them must be a `.`, which is dropped.
fn split_fixed(hostname: &str, length: NonZeroUsize) -> Split {
    let mismatch = || NotRoutable::FixedSuffixMismatch {
        suffix_length: length.get(),
    };
    let cut = hostname
        .char_indices()
        .rev()
        .nth(length.get() - 1)
        .map(|(index, _)| index)
        .ok_or_else(mismatch)?;
    let subdomain = hostname[..cut].strip_suffix('.').ok_or_else(mismatch)?;
    Ok((
        hostname[cut..].to_string(),
        subdomain.to_string(),
        SplitStrategy::FixedSuffix,
    ))
}

fn split_dynamic(sub_domains: &[&str], domain: Option<&str>, top_level_domains: &[&str]) -> Split {
    let mut joined = String::new();
    for label in domain.into_iter().chain(top_level_domains.iter().copied()) {
        if !joined.is_empty() {
            joined.push('.');
        }
        joined.push_str(label);
    }
    if joined.is_empty() {
        return Err(NotRoutable::Unclassified);
    }
    Ok((joined, sub_domains.join("."), SplitStrategy::PublicSuffix))
}

fn split_reserved(labels: &[&str]) -> Split {
    match labels.split_last() {
        Some((last, rest)) => Ok((last.to_string(), rest.join("."), SplitStrategy::Reserved)),
        None => Err(NotRoutable::Unclassified),
    }
}

/// Normalizes a URL path into a resource key.
///
/// Resources are stored as `/path/to/resource.extension` exclusively, so the
/// root maps to `/index.html` and trailing slashes are dropped. Idempotent.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        INDEX_DOCUMENT_PATH
    } else {
        trimmed
    }
}
