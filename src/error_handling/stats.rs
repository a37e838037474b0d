//! Routing statistics tracking.
//!
//! This module provides thread-safe counters for routing outcomes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::RouteOutcome;

/// Thread-safe routing statistics tracker.
///
/// Tracks one atomic counter per [`RouteOutcome`], so a single instance can be
/// shared across workers using `Arc`. All outcomes are initialized to zero on
/// creation.
pub struct RoutingStats {
    outcomes: HashMap<RouteOutcome, AtomicUsize>,
}

impl Default for RoutingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingStats {
    /// Creates a tracker with every outcome counter set to zero.
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in RouteOutcome::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }
        RoutingStats { outcomes }
    }

    /// Increment the counter for an outcome.
    pub fn record(&self, outcome: RouteOutcome) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to record outcome {:?} which is not in the map. \
                 This indicates a bug in RoutingStats initialization.",
                outcome
            );
        }
    }

    /// Get the count for an outcome.
    ///
    /// Returns 0 if the outcome is not in the map.
    pub fn get_count(&self, outcome: RouteOutcome) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of URLs that produced a routing key.
    pub fn total_routable(&self) -> usize {
        RouteOutcome::iter()
            .filter(RouteOutcome::is_routable)
            .map(|o| self.get_count(o))
            .sum()
    }

    /// Total number of URLs that did not produce a routing key.
    pub fn total_not_routable(&self) -> usize {
        RouteOutcome::iter()
            .filter(|o| !o.is_routable())
            .map(|o| self.get_count(o))
            .sum()
    }

    /// Total number of URLs seen.
    pub fn total(&self) -> usize {
        RouteOutcome::iter().map(|o| self.get_count(o)).sum()
    }
}
