//! Diagnostic checkpoints for domain extraction.

use super::classifier::HostClassification;
use super::RoutingKey;
use crate::error_handling::NotRoutable;

/// Receives diagnostics at fixed points of [`DomainParser::extract_with`].
///
/// Every method has an empty default, so an observer only overrides the
/// checkpoints it cares about. Observers cannot influence the result.
///
/// [`DomainParser::extract_with`]: super::DomainParser::extract_with
pub trait ExtractionObserver {
    /// Called once the host has been classified.
    fn classified(&self, _hostname: &str, _classification: &HostClassification<'_>) {}

    /// Called when a routing key has been produced.
    fn split(&self, _hostname: &str, _key: &RoutingKey) {}

    /// Called when the host turned out not to be routable.
    fn not_routable(&self, _hostname: &str, _reason: &NotRoutable) {}
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {}

/// Observer that forwards checkpoints to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ExtractionObserver for LogObserver {
    fn classified(&self, hostname: &str, classification: &HostClassification<'_>) {
        log::trace!("Classified {hostname}: {classification:?}");
    }

    fn split(&self, hostname: &str, key: &RoutingKey) {
        log::debug!(
            "Split {hostname} ({}): domain={}, subdomain={:?}, path={}",
            key.strategy,
            key.domain,
            key.subdomain,
            key.path
        );
    }

    fn not_routable(&self, hostname: &str, reason: &NotRoutable) {
        log::debug!("Host {hostname:?} is not routable: {reason}");
    }
}
