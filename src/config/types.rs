//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::SplitConfig;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the routing records written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated line per URL
    Plain,
    /// One JSON object per line
    Json,
}

/// Routing configuration, parsed from the command line or built in code.
///
/// # Examples
///
/// ```no_run
/// use portal_router::Config;
///
/// let config = Config {
///     urls: vec!["https://flatland.walrus.site/".to_string()],
///     portal_domain_name_length: Some(11),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portal_router",
    version,
    about = "Splits portal URLs into portal domain, tenant subdomain, and resource path"
)]
pub struct Config {
    /// URLs to route (scheme optional; https is assumed)
    pub urls: Vec<String>,

    /// File to read URLs from, one per line (use "-" for stdin)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Length of the portal's own domain (e.g. 11 for walrus.site).
    /// Omit or set to 0 to split with the Public Suffix List.
    #[arg(long, env = "PORTAL_DOMAIN_NAME_LENGTH")]
    pub portal_domain_name_length: Option<usize>,

    /// Output format for routing records
    #[arg(long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Config {
    /// Split settings derived from this configuration.
    pub fn split_config(&self) -> SplitConfig {
        self.portal_domain_name_length
            .map(SplitConfig::fixed)
            .unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            portal_domain_name_length: None,
            output: OutputFormat::Plain,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
