//! Error type definitions.
//!
//! This module defines the error types and routing outcome categories used
//! throughout the application.

use log::SetLoggerError;
use serde::Serialize;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Reasons a host cannot be turned into a routing key.
///
/// This is the single failure mode of domain extraction. It is a value, not a
/// propagated error: callers check for it and apply their own fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotRoutable {
    /// The host is not a listed public suffix, a reserved name, or an IP literal.
    #[error("host is not under a known public suffix")]
    Unclassified,

    /// The fixed-length split could not cut the host at a label separator.
    #[error("host does not end with a {suffix_length}-character portal domain preceded by '.'")]
    FixedSuffixMismatch {
        /// Configured length of the portal domain
        suffix_length: usize,
    },
}

/// Errors raised while inspecting an incoming request outside the core parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Neither `x-forwarded-host` nor `host` was present.
    #[error("No hostname found in request header")]
    MissingHost,
}

/// Terminal outcome of routing one URL, used for run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RouteOutcome {
    /// Listed host split at the configured portal domain length
    ListedFixed,
    /// Listed host split using the Public Suffix List
    ListedDynamic,
    /// Loopback name, special-use name, or IP literal
    Reserved,
    /// Host could not be classified
    Unclassified,
    /// Fixed-length split precondition failed
    FixedSuffixMismatch,
    /// Input line was not a usable http(s) URL
    InvalidUrl,
}

impl std::fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RouteOutcome {
    /// Human-readable label used in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOutcome::ListedFixed => "Listed host (fixed portal length)",
            RouteOutcome::ListedDynamic => "Listed host (public suffix)",
            RouteOutcome::Reserved => "Reserved host",
            RouteOutcome::Unclassified => "Unclassified host",
            RouteOutcome::FixedSuffixMismatch => "Portal suffix mismatch",
            RouteOutcome::InvalidUrl => "Invalid URL",
        }
    }

    /// Machine-readable key used in routing records, e.g. `listed_fixed`.
    pub fn key(&self) -> &'static str {
        self.into()
    }

    /// Whether this outcome produced a routing key.
    pub fn is_routable(&self) -> bool {
        matches!(
            self,
            RouteOutcome::ListedFixed | RouteOutcome::ListedDynamic | RouteOutcome::Reserved
        )
    }
}

impl From<&NotRoutable> for RouteOutcome {
    fn from(reason: &NotRoutable) -> Self {
        match reason {
            NotRoutable::Unclassified => RouteOutcome::Unclassified,
            NotRoutable::FixedSuffixMismatch { .. } => RouteOutcome::FixedSuffixMismatch,
        }
    }
}
