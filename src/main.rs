//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `portal_router` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use portal_router::initialization::init_logger_with;
use portal_router::{run_batch, Config};

fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting PORTAL_DOMAIN_NAME_LENGTH per deployment
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_batch(&config) {
        Ok(report) => {
            eprintln!(
                "Routed {} URL{} ({} routable, {} not routable)",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.routable,
                report.not_routable
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("portal_router error: {:#}", e);
            process::exit(1);
        }
    }
}
