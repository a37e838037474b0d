//! Main application modules.
//!
//! This module provides utilities for URL input validation and statistics
//! printing used by the batch runner.

pub mod statistics;
pub mod url;

// Re-export public API
pub use statistics::print_route_statistics;
pub use url::validate_and_normalize_url;
