// Domain module tests.

use super::*;
use std::cell::RefCell;

/// Classifier that returns a canned classification for every host.
struct FakeClassifier {
    kind: FakeKind,
}

enum FakeKind {
    Listed {
        sub_domains: Vec<&'static str>,
        domain: Option<&'static str>,
        top_level_domains: Vec<&'static str>,
    },
    Reserved(Vec<&'static str>),
    Other,
}

impl SuffixClassifier for FakeClassifier {
    fn classify<'a>(&self, hostname: &'a str) -> HostClassification<'a> {
        match &self.kind {
            FakeKind::Listed {
                sub_domains,
                domain,
                top_level_domains,
            } => HostClassification::Listed {
                hostname,
                sub_domains: sub_domains.clone(),
                domain: *domain,
                top_level_domains: top_level_domains.clone(),
            },
            FakeKind::Reserved(labels) => HostClassification::Reserved {
                hostname,
                labels: labels.clone(),
            },
            FakeKind::Other => HostClassification::Other,
        }
    }
}

fn fake_parser(kind: FakeKind) -> DomainParser<FakeClassifier> {
    DomainParser::new(FakeClassifier { kind })
}

fn psl_parser() -> DomainParser {
    DomainParser::new(PslClassifier::new())
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn test_fixed_length_split_of_portal_host() {
    let parser = psl_parser();
    let result = parser.extract(&url("https://flatland.walrus.site/"), &SplitConfig::fixed(11));
    assert_eq!(
        result,
        Extraction::Routable(RoutingKey {
            domain: "walrus.site".to_string(),
            subdomain: "flatland".to_string(),
            path: "/index.html".to_string(),
            strategy: SplitStrategy::FixedSuffix,
        })
    );
}

#[test]
fn test_dynamic_split_uses_classifier_labels() {
    let parser = fake_parser(FakeKind::Listed {
        sub_domains: vec!["flatland"],
        domain: Some("walrus"),
        top_level_domains: vec!["site"],
    });
    let result = parser.extract(
        &url("https://flatland.walrus.site/img/logo.png/"),
        &SplitConfig::dynamic(),
    );
    assert_eq!(
        result,
        Extraction::Routable(RoutingKey {
            domain: "walrus.site".to_string(),
            subdomain: "flatland".to_string(),
            path: "/img/logo.png".to_string(),
            strategy: SplitStrategy::PublicSuffix,
        })
    );
}

#[test]
fn test_reserved_single_label_host() {
    let parser = psl_parser();
    let result = parser.extract(&url("http://localhost/"), &SplitConfig::dynamic());
    assert_eq!(
        result,
        Extraction::Routable(RoutingKey {
            domain: "localhost".to_string(),
            subdomain: String::new(),
            path: "/index.html".to_string(),
            strategy: SplitStrategy::Reserved,
        })
    );
}

#[test]
fn test_unclassified_host_is_not_routable() {
    let parser = fake_parser(FakeKind::Other);
    let u = url("https://anything.example.com/page");
    assert_eq!(
        parser.extract(&u, &SplitConfig::dynamic()),
        Extraction::NotRoutable(NotRoutable::Unclassified)
    );
    assert_eq!(parser.domain_of(&u, &SplitConfig::dynamic()), None);
    assert_eq!(parser.subdomain_and_path_of(&u, &SplitConfig::dynamic()), None);
}

#[test]
fn test_unknown_tld_is_not_routable_with_real_list() {
    let parser = psl_parser();
    let u = url("https://site.notarealtld/");
    assert_eq!(
        parser.extract(&u, &SplitConfig::dynamic()),
        Extraction::NotRoutable(NotRoutable::Unclassified)
    );
    // The fixed strategy is never reached for unclassified hosts.
    assert_eq!(
        parser.extract(&u, &SplitConfig::fixed(11)),
        Extraction::NotRoutable(NotRoutable::Unclassified)
    );
}

#[test]
fn test_dynamic_split_with_real_list() {
    let parser = psl_parser();
    let config = SplitConfig::dynamic();
    assert_eq!(
        parser.domain_of(&url("https://docs.rust-lang.org/std/"), &config),
        Some("rust-lang.org".to_string())
    );
    assert_eq!(
        parser.subdomain_and_path_of(&url("https://docs.rust-lang.org/std/"), &config),
        Some(SubdomainAndPath {
            subdomain: "docs".to_string(),
            path: "/std".to_string(),
        })
    );
}

#[test]
fn test_raw_hostnames_match_regardless_of_case() {
    let parser = psl_parser();
    let listed = parser
        .extract_parts_with("Docs.Rust-Lang.ORG", "/", &SplitConfig::dynamic(), &NoopObserver)
        .into_result()
        .unwrap();
    assert_eq!(listed.domain, "Rust-Lang.ORG");
    assert_eq!(listed.subdomain, "Docs");
    assert_eq!(listed.strategy, SplitStrategy::PublicSuffix);

    let reserved = parser
        .extract_parts_with("Foo.LOCALHOST", "/", &SplitConfig::dynamic(), &NoopObserver)
        .into_result()
        .unwrap();
    assert_eq!(reserved.strategy, SplitStrategy::Reserved);
}

#[test]
fn test_dynamic_split_multi_part_suffix() {
    let parser = psl_parser();
    let key = parser
        .extract(&url("https://a.b.example.co.uk/x"), &SplitConfig::dynamic())
        .into_result()
        .unwrap();
    assert_eq!(key.domain, "example.co.uk");
    assert_eq!(key.subdomain, "a.b");
    assert_eq!(key.path, "/x");
}

#[test]
fn test_dynamic_split_without_subdomain() {
    let parser = psl_parser();
    let key = parser
        .extract(&url("https://example.com/"), &SplitConfig::dynamic())
        .into_result()
        .unwrap();
    assert_eq!(key.domain, "example.com");
    assert_eq!(key.subdomain, "");
}

#[test]
fn test_host_that_is_a_public_suffix() {
    let parser = psl_parser();
    let key = parser
        .extract(&url("https://co.uk/"), &SplitConfig::dynamic())
        .into_result()
        .unwrap();
    assert_eq!(key.domain, "co.uk");
    assert_eq!(key.subdomain, "");
}

#[test]
fn test_fixed_split_keeps_nested_subdomains() {
    let parser = psl_parser();
    let key = parser
        .extract(
            &url("https://subname.name.walrus.site/about/"),
            &SplitConfig::fixed(11),
        )
        .into_result()
        .unwrap();
    assert_eq!(key.domain, "walrus.site");
    assert_eq!(key.subdomain, "subname.name");
    assert_eq!(key.path, "/about");
}

#[test]
fn test_fixed_split_rejects_host_equal_to_portal_domain() {
    let parser = psl_parser();
    assert_eq!(
        parser.extract(&url("https://walrus.site/"), &SplitConfig::fixed(11)),
        Extraction::NotRoutable(NotRoutable::FixedSuffixMismatch { suffix_length: 11 })
    );
}

#[test]
fn test_fixed_split_rejects_short_host() {
    let parser = psl_parser();
    assert_eq!(
        parser.extract(&url("https://a.io/"), &SplitConfig::fixed(11)),
        Extraction::NotRoutable(NotRoutable::FixedSuffixMismatch { suffix_length: 11 })
    );
}

#[test]
fn test_fixed_split_rejects_cut_inside_label() {
    let parser = psl_parser();
    // The character before the last 11 is 'w', not a separator.
    assert_eq!(
        parser.extract(&url("https://flatland.wwalrus.site/"), &SplitConfig::fixed(11)),
        Extraction::NotRoutable(NotRoutable::FixedSuffixMismatch { suffix_length: 11 })
    );
}

#[test]
fn test_fixed_split_counts_characters_not_bytes() {
    let parser = fake_parser(FakeKind::Listed {
        sub_domains: vec![],
        domain: None,
        top_level_domains: vec![],
    });
    let result = parser.extract_parts_with("café.über.site", "/", &SplitConfig::fixed(9), &NoopObserver);
    let key = result.into_result().unwrap();
    assert_eq!(key.domain, "über.site");
    assert_eq!(key.subdomain, "café");
}

#[test]
fn test_zero_length_selects_dynamic_strategy() {
    assert_eq!(SplitConfig::fixed(0), SplitConfig::dynamic());
    let parser = psl_parser();
    let key = parser
        .extract(&url("https://docs.rust-lang.org/"), &SplitConfig::fixed(0))
        .into_result()
        .unwrap();
    assert_eq!(key.strategy, SplitStrategy::PublicSuffix);
}

#[test]
fn test_reserved_host_with_subdomains() {
    let parser = psl_parser();
    let key = parser
        .extract(&url("http://blog.my-site.localhost:3000/a/"), &SplitConfig::fixed(11))
        .into_result()
        .unwrap();
    // Reserved hosts ignore the fixed length.
    assert_eq!(key.domain, "localhost");
    assert_eq!(key.subdomain, "blog.my-site");
    assert_eq!(key.path, "/a");
    assert_eq!(key.strategy, SplitStrategy::Reserved);
}

#[test]
fn test_ip_literal_is_reserved_single_label() {
    let parser = psl_parser();
    let key = parser
        .extract(&url("http://127.0.0.1:8080/"), &SplitConfig::dynamic())
        .into_result()
        .unwrap();
    assert_eq!(key.domain, "127.0.0.1");
    assert_eq!(key.subdomain, "");

    let key = parser
        .extract(&url("http://[::1]/x"), &SplitConfig::dynamic())
        .into_result()
        .unwrap();
    assert_eq!(key.domain, "[::1]");
    assert_eq!(key.subdomain, "");
}

#[test]
fn test_reserved_with_no_labels_is_not_routable() {
    let parser = fake_parser(FakeKind::Reserved(vec![]));
    assert_eq!(
        parser.extract(&url("http://localhost/"), &SplitConfig::dynamic()),
        Extraction::NotRoutable(NotRoutable::Unclassified)
    );
}

#[test]
fn test_listed_with_no_labels_is_not_routable() {
    let parser = fake_parser(FakeKind::Listed {
        sub_domains: vec![],
        domain: None,
        top_level_domains: vec![],
    });
    assert_eq!(
        parser.extract(&url("https://example.com/"), &SplitConfig::dynamic()),
        Extraction::NotRoutable(NotRoutable::Unclassified)
    );
}

#[test]
fn test_url_without_host_is_not_routable() {
    let parser = psl_parser();
    let result = parser.extract(&url("data:text/plain,hello"), &SplitConfig::dynamic());
    assert!(!result.is_routable());
    assert_eq!(result.domain(), None);
}

#[test]
fn test_extraction_outcome_categories() {
    let parser = psl_parser();
    let fixed = SplitConfig::fixed(11);
    let dynamic = SplitConfig::dynamic();
    assert_eq!(
        parser.extract(&url("https://a.walrus.site/"), &fixed).outcome(),
        RouteOutcome::ListedFixed
    );
    assert_eq!(
        parser.extract(&url("https://a.example.com/"), &dynamic).outcome(),
        RouteOutcome::ListedDynamic
    );
    assert_eq!(
        parser.extract(&url("http://localhost/"), &dynamic).outcome(),
        RouteOutcome::Reserved
    );
    assert_eq!(
        parser.extract(&url("https://x.notarealtld/"), &dynamic).outcome(),
        RouteOutcome::Unclassified
    );
    assert_eq!(
        parser.extract(&url("https://walrus.site/"), &fixed).outcome(),
        RouteOutcome::FixedSuffixMismatch
    );
}

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("/"), "/index.html");
    assert_eq!(normalize_path(""), "/index.html");
    assert_eq!(normalize_path("/a/b/"), "/a/b");
    assert_eq!(normalize_path("/a/b"), "/a/b");
    assert_eq!(normalize_path("/index.html"), "/index.html");
    assert_eq!(normalize_path("/a//"), "/a");
    assert_eq!(normalize_path("//"), "/index.html");
}

/// Records the checkpoints it sees.
#[derive(Default)]
struct RecordingObserver {
    events: RefCell<Vec<String>>,
}

impl ExtractionObserver for RecordingObserver {
    fn classified(&self, hostname: &str, classification: &HostClassification<'_>) {
        self.events
            .borrow_mut()
            .push(format!("classified {hostname} {}", classification.kind()));
    }

    fn split(&self, _hostname: &str, key: &RoutingKey) {
        self.events
            .borrow_mut()
            .push(format!("split {} {}", key.strategy, key.domain));
    }

    fn not_routable(&self, hostname: &str, reason: &NotRoutable) {
        self.events
            .borrow_mut()
            .push(format!("not_routable {hostname} {reason:?}"));
    }
}

#[test]
fn test_observer_sees_checkpoints_in_order() {
    let parser = psl_parser();
    let observer = RecordingObserver::default();
    parser.extract_with(
        &url("https://docs.rust-lang.org/"),
        &SplitConfig::dynamic(),
        &observer,
    );
    parser.extract_with(&url("https://x.notarealtld/"), &SplitConfig::dynamic(), &observer);
    assert_eq!(
        observer.events.into_inner(),
        vec![
            "classified docs.rust-lang.org listed".to_string(),
            "split public_suffix rust-lang.org".to_string(),
            "classified x.notarealtld other".to_string(),
            "not_routable x.notarealtld Unclassified".to_string(),
        ]
    );
}

#[test]
fn test_observer_does_not_change_result() {
    let parser = psl_parser();
    let u = url("https://flatland.walrus.site/a/");
    let config = SplitConfig::fixed(11);
    assert_eq!(
        parser.extract_with(&u, &config, &LogObserver),
        parser.extract(&u, &config)
    );
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = std::sync::Arc::new(psl_parser());
    let handles: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|sub| {
            let parser = std::sync::Arc::clone(&parser);
            std::thread::spawn(move || {
                let u = Url::parse(&format!("https://{sub}.walrus.site/")).unwrap();
                parser
                    .subdomain_and_path_of(&u, &SplitConfig::fixed(11))
                    .map(|s| s.subdomain)
            })
        })
        .collect();
    let subdomains: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        subdomains,
        vec![
            Some("a".to_string()),
            Some("b".to_string()),
            Some("c".to_string()),
            Some("d".to_string()),
        ]
    );
}

// Property-based tests using proptest
use proptest::prelude::*;
use psl::Psl;

proptest! {
    #[test]
    fn test_normalize_path_idempotent(path in "/[a-z/._-]{0,40}") {
        let once = normalize_path(&path);
        prop_assert_eq!(normalize_path(once), once);
    }

    #[test]
    fn test_normalized_path_shape(path in "/[a-z/._-]{0,40}") {
        let normalized = normalize_path(&path);
        prop_assert!(normalized.starts_with('/'));
        prop_assert!(!normalized.ends_with('/'));
    }

    #[test]
    fn test_single_trailing_slash_removed(path in "/[a-z]{1,10}(/[a-z]{1,10}){0,4}") {
        let with_slash = format!("{path}/");
        prop_assert_eq!(normalize_path(&with_slash), path.as_str());
    }

    #[test]
    fn test_three_label_hosts_split_dynamically(
        sub in "[a-z]{1,10}",
        domain in "[a-z]{3,15}",
        tld in "(com|org|net)"
    ) {
        // Skip labels that form private suffixes (e.g. blogspot.com)
        let host = format!("{sub}.{domain}.{tld}");
        prop_assume!(psl::List
            .suffix(host.as_bytes())
            .is_some_and(|suffix| suffix.as_bytes() == tld.as_bytes()));
        let parser = psl_parser();
        let u = Url::parse(&format!("https://{host}/")).unwrap();
        let config = SplitConfig::dynamic();
        prop_assert_eq!(parser.domain_of(&u, &config), Some(format!("{domain}.{tld}")));
        prop_assert_eq!(
            parser.subdomain_and_path_of(&u, &config).map(|s| s.subdomain),
            Some(sub)
        );
    }

    #[test]
    fn test_fixed_split_recovers_subdomain(sub in "[a-z0-9]{1,20}(\\.[a-z0-9]{1,20}){0,2}") {
        let parser = psl_parser();
        let u = Url::parse(&format!("https://{sub}.walrus.site/")).unwrap();
        let key = parser.extract(&u, &SplitConfig::fixed(11)).into_result();
        prop_assert_eq!(key.map(|k| (k.domain, k.subdomain)), Ok(("walrus.site".to_string(), sub)));
    }
}
