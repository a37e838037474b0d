//! portal_router library: domain parsing for a multi-tenant portal
//!
//! A portal serves many tenant sites under subdomains of one base domain
//! (`flatland.walrus.site`, `docs.walrus.site`, ...). This library splits a
//! request URL into the portal domain, the tenant subdomain, and a normalized
//! resource path, and provides the request-level helpers built on top of that
//! split: the rewrite decision and page-view analytics.
//!
//! # Example
//!
//! ```no_run
//! use portal_router::{init_parser, SplitConfig};
//! use url::Url;
//!
//! let parser = init_parser();
//! let url = Url::parse("https://flatland.walrus.site/img/").unwrap();
//! let parsed = parser
//!     .subdomain_and_path_of(&url, &SplitConfig::fixed(11))
//!     .unwrap();
//! assert_eq!(parsed.subdomain, "flatland");
//! assert_eq!(parsed.path, "/img");
//! ```

#![warn(missing_docs)]

pub mod analytics;
mod app;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod routing;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use domain::{
    normalize_path, DomainParser, Extraction, PslClassifier, RoutingKey, SplitConfig,
    SplitStrategy, SubdomainAndPath, SuffixClassifier,
};
pub use error_handling::{NotRoutable, RequestError, RouteOutcome, RoutingStats};
pub use initialization::init_parser;
pub use run::{run_batch, run_batch_to, RouteReport};

// Internal run module (contains the batch routing logic)
mod run {
    use std::fs::File;
    use std::io::{self, BufRead, BufReader, Write};
    use std::path::Path;

    use anyhow::{Context, Result};
    use log::info;
    use serde::Serialize;

    use crate::app::{print_route_statistics, validate_and_normalize_url};
    use crate::config::{Config, OutputFormat};
    use crate::domain::{Extraction, LogObserver, SplitStrategy};
    use crate::error_handling::{RouteOutcome, RoutingStats};
    use crate::initialization::init_parser;

    /// Results of a batch routing run.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RouteReport {
        /// Total number of URLs read
        pub total_urls: usize,
        /// Number of URLs that produced a routing key
        pub routable: usize,
        /// Number of URLs that were invalid or not routable
        pub not_routable: usize,
    }

    /// One output line.
    #[derive(Debug, Serialize)]
    struct RouteRecord<'a> {
        url: &'a str,
        outcome: &'static str,
        domain: Option<&'a str>,
        subdomain: Option<&'a str>,
        path: Option<&'a str>,
        strategy: Option<SplitStrategy>,
    }

    impl RouteRecord<'_> {
        fn write_plain<W: Write>(&self, out: &mut W) -> io::Result<()> {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                self.url,
                self.outcome,
                self.domain.unwrap_or("-"),
                self.subdomain.unwrap_or("-"),
                self.path.unwrap_or("-"),
            )
        }
    }

    /// Routes every input URL and writes one record per URL to stdout.
    ///
    /// See [`run_batch_to`].
    pub fn run_batch(config: &Config) -> Result<RouteReport> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_batch_to(config, &mut out)
    }

    /// Routes every input URL and writes one record per URL to `out`.
    ///
    /// URLs come from `config.urls` followed by the lines of `config.file`
    /// (`-` reads stdin). Blank lines and lines starting with `#` are skipped.
    /// Plain output is tab-separated (`url outcome domain subdomain path`,
    /// `-` for absent fields); JSON output is one object per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be read or the output cannot
    /// be written. Invalid or unroutable URLs are reported, not errors.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use portal_router::{run_batch_to, Config};
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config {
    ///     urls: vec!["flatland.walrus.site/about/".to_string()],
    ///     portal_domain_name_length: Some(11),
    ///     ..Default::default()
    /// };
    /// let mut out = Vec::new();
    /// let report = run_batch_to(&config, &mut out)?;
    /// assert_eq!(report.routable, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run_batch_to<W: Write>(config: &Config, out: &mut W) -> Result<RouteReport> {
        let mut inputs = config.urls.clone();
        if let Some(path) = &config.file {
            inputs.extend(read_url_lines(path)?);
        }
        info!("Total URLs to route: {}", inputs.len());

        let parser = init_parser();
        let split = config.split_config();
        let observer = LogObserver;
        let stats = RoutingStats::new();

        for input in &inputs {
            let extraction = validate_and_normalize_url(input)
                .map(|url| parser.extract_with(&url, &split, &observer));
            let outcome = extraction
                .as_ref()
                .map(Extraction::outcome)
                .unwrap_or(RouteOutcome::InvalidUrl);
            stats.record(outcome);

            let key = extraction.as_ref().and_then(Extraction::routing_key);
            let record = RouteRecord {
                url: input,
                outcome: outcome.key(),
                domain: key.map(|k| k.domain.as_str()),
                subdomain: key.map(|k| k.subdomain.as_str()),
                path: key.map(|k| k.path.as_str()),
                strategy: key.map(|k| k.strategy),
            };
            match config.output {
                OutputFormat::Plain => record.write_plain(out),
                OutputFormat::Json => {
                    serde_json::to_writer(&mut *out, &record)?;
                    writeln!(out)
                }
            }
            .context("Failed to write routing record")?;
        }
        out.flush().context("Failed to flush output")?;

        print_route_statistics(&stats);
        Ok(RouteReport {
            total_urls: stats.total(),
            routable: stats.total_routable(),
            not_routable: stats.total_not_routable(),
        })
    }

    /// Reads URL lines from `path`, or stdin for `-`.
    fn read_url_lines(path: &Path) -> Result<Vec<String>> {
        let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
            info!("Reading URLs from stdin");
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        };

        let mut urls = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read input line")?;
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                urls.push(trimmed.to_string());
            }
        }
        Ok(urls)
    }

}
