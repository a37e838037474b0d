//! Tests for CLI argument parsing.

use clap::Parser;
use portal_router::{Config, LogFormat, LogLevel, OutputFormat, SplitConfig};
use std::path::PathBuf;

#[test]
fn test_cli_positional_urls() {
    let args = ["portal_router", "flatland.walrus.site", "https://docs.rust-lang.org/std/"];
    let config = Config::try_parse_from(args.iter()).expect("Should parse positional URLs");

    assert_eq!(
        config.urls,
        vec!["flatland.walrus.site", "https://docs.rust-lang.org/std/"]
    );
    assert_eq!(config.file, None);
    assert_eq!(config.output, OutputFormat::Plain);
    // LogLevel and LogFormat don't implement PartialEq, so we compare via conversion
    assert_eq!(
        log::LevelFilter::from(config.log_level.clone()),
        log::LevelFilter::from(LogLevel::Info)
    );
    match config.log_format {
        LogFormat::Plain => {}
        _ => panic!("Should be Plain format"),
    }
}

#[test]
fn test_cli_with_options() {
    let args = vec![
        "portal_router",
        "--file",
        "urls.txt",
        "--portal-domain-name-length",
        "11",
        "--output",
        "json",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ];
    let config = Config::try_parse_from(args.iter()).expect("Should parse options");

    assert!(config.urls.is_empty());
    assert_eq!(config.file, Some(PathBuf::from("urls.txt")));
    assert_eq!(config.portal_domain_name_length, Some(11));
    assert_eq!(config.split_config(), SplitConfig::fixed(11));
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(
        log::LevelFilter::from(config.log_level.clone()),
        log::LevelFilter::from(LogLevel::Debug)
    );
    match config.log_format {
        LogFormat::Json => {}
        _ => panic!("Should be Json format"),
    }
}

#[test]
fn test_cli_stdin_file() {
    let config = Config::try_parse_from(["portal_router", "-f", "-"]).expect("Should parse -f -");
    assert_eq!(config.file, Some(PathBuf::from("-")));
}

#[test]
fn test_cli_zero_length_means_dynamic() {
    let config = Config::try_parse_from(["portal_router", "--portal-domain-name-length", "0"])
        .expect("Should parse zero length");
    assert_eq!(config.split_config(), SplitConfig::dynamic());
}

#[test]
fn test_cli_rejects_invalid_values() {
    assert!(Config::try_parse_from(["portal_router", "--output", "xml"]).is_err());
    assert!(Config::try_parse_from(["portal_router", "--log-level", "loud"]).is_err());
    assert!(
        Config::try_parse_from(["portal_router", "--portal-domain-name-length", "-3"]).is_err()
    );
    assert!(
        Config::try_parse_from(["portal_router", "--portal-domain-name-length", "eleven"])
            .is_err()
    );
}

#[test]
fn test_config_default_matches_cli_defaults() {
    let config = Config::default();
    assert!(config.urls.is_empty());
    assert_eq!(config.file, None);
    assert_eq!(config.portal_domain_name_length, None);
    assert_eq!(config.output, OutputFormat::Plain);
    assert_eq!(config.split_config(), SplitConfig::dynamic());
}
