//! Error handling and routing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, request inspection)
//! - The "not routable" outcome of domain extraction
//! - Routing outcome categories and thread-safe counters

mod stats;
mod types;

// Re-export public API
pub use stats::RoutingStats;
pub use types::{InitializationError, NotRoutable, RequestError, RouteOutcome};
