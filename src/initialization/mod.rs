//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - Domain parser over the Public Suffix List

mod logger;

use std::sync::Arc;

use crate::domain::{DomainParser, PslClassifier};

// Re-export public API
pub use logger::init_logger_with;

/// Initializes the domain parser.
///
/// The Public Suffix List is compiled into the binary, so this cannot fail
/// and performs no I/O. The parser is immutable; share the returned `Arc`
/// across all request workers.
pub fn init_parser() -> Arc<DomainParser<PslClassifier>> {
    Arc::new(DomainParser::new(PslClassifier::new()))
}
