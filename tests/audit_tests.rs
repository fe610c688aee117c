//! End-to-end audit tests
//!
//! Remote targets are served by wiremock; local targets are built in
//! temporary directories.

use cipwe::crawler::FetchOptions;
use cipwe::{audit, crawl, AuditError, AuditResult, FetchError};
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_options() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(5),
        max_retries: 1,
        retry_backoff: Duration::from_millis(10),
        ..FetchOptions::default()
    }
}

fn rule<'a>(audit: &'a AuditResult, id: &str) -> &'a cipwe::RuleResult {
    audit
        .rules
        .iter()
        .find(|r| r.rule_id == id)
        .unwrap_or_else(|| panic!("missing rule {}", id))
}

async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// A page that satisfies every check
fn optimized_page() -> String {
    let description = "Example Widgets builds durable, repairable widgets for home and \
                       professional workshops, shipped worldwide with a lifetime warranty.";
    let prose = vec!["Our widgets are machined from solid stock and tested by hand."; 40].join(" ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<title>Example Widgets - Durable widgets for every workshop</title>
<meta name="description" content="{description}">
<meta name="author" content="Example Team">
<meta name="keywords" content="widgets, workshop, tools">
<meta property="og:title" content="Example Widgets">
<meta property="og:description" content="{description}">
<meta property="og:image" content="https://example.com/og.png">
<link rel="canonical" href="https://example.com/">
<script type="application/ld+json">
{{"@context": "https://schema.org", "@graph": [
  {{"@type": "Organization", "name": "Example Widgets"}},
  {{"@type": "FAQPage", "mainEntity": []}}
]}}
</script>
</head>
<body>
<header><nav><ul><li><a href="/">Home</a></li></ul></nav></header>
<main>
<article>
<h1>Example Widgets</h1>
<p class="summary">Durable widgets, built to be repaired.</p>
<section>
<h2>What makes our widgets durable?</h2>
<p>{prose}</p>
<ul><li>Solid stock</li></ul>
<ol><li>Machine</li><li>Test</li></ol>
<table><tr><td>Warranty</td><td>Lifetime</td></tr></table>
</section>
<section>
<h2>How do I order?</h2>
<details><summary>Shipping</summary><p>Worldwide.</p></details>
</section>
</article>
</main>
<footer>Example Widgets</footer>
</body>
</html>"#
    )
}

#[tokio::test]
async fn test_optimized_site_scores_full_marks() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(&server, "/", 200, &optimized_page()).await;
    serve(
        &server,
        "/robots.txt",
        200,
        &format!("User-agent: GPTBot\nAllow: /\n\nSitemap: {}/sitemap.xml\n", base),
    )
    .await;
    serve(
        &server,
        "/sitemap.xml",
        200,
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{}/</loc><lastmod>2024-01-01</lastmod><priority>1.0</priority></url>
</urlset>"#,
            base
        ),
    )
    .await;
    serve(
        &server,
        "/llms.txt",
        200,
        "# Example Widgets\n\n> Durable, repairable widgets.\n\n## Docs\n\n- [Catalog](https://example.com/catalog)\n",
    )
    .await;

    let result = audit(&base, &test_options()).await.unwrap();

    let failed: Vec<_> = result.failed().map(|r| (&r.rule_id, &r.message)).collect();
    assert!(failed.is_empty(), "failed rules: {:?}", failed);
    assert_eq!(result.total_score, 100);
    assert_eq!(result.max_score, 100);
    assert_eq!(result.grade, "A+");
    assert_eq!(result.passed_count, 19);
    assert_eq!(result.url, base);
}

#[tokio::test]
async fn test_minimal_page_scores_low() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        200,
        "<html><head><title>A</title></head><body><h1>Hi</h1></body></html>",
    )
    .await;

    let result = audit(&server.uri(), &test_options()).await.unwrap();

    assert_eq!(result.rules.len(), 19);
    assert_eq!(rule(&result, "has-title").score, 2);
    assert!(!rule(&result, "has-title").passed);
    assert_eq!(rule(&result, "single-h1").score, 5);
    assert_eq!(rule(&result, "has-robots").score, 0);
    assert_eq!(rule(&result, "has-sitemap").score, 0);
    assert_eq!(rule(&result, "has-llms-txt").score, 0);
    assert!(result.percentage < 50);
    assert_eq!(result.passed_count + result.failed_count, 19);
}

#[tokio::test]
async fn test_html_catch_all_auxiliary_is_absent() {
    let server = MockServer::start().await;
    serve(&server, "/", 200, "<html><body><h1>Home</h1></body></html>").await;
    serve(
        &server,
        "/robots.txt",
        200,
        "<!DOCTYPE html><html><body>Not found</body></html>",
    )
    .await;
    serve(&server, "/llms.txt", 200, "# Site\nA real llms.txt").await;

    let data = crawl(&server.uri(), &test_options()).await.unwrap();

    assert!(data.robots_txt.is_none());
    assert!(data.sitemap_xml.is_none());
    assert_eq!(data.llms_txt.as_deref(), Some("# Site\nA real llms.txt"));
    assert!(!data.is_local);
    assert_eq!(data.url, server.uri());
}

#[tokio::test]
async fn test_auxiliary_files_are_fetched_concurrently() {
    let server = MockServer::start().await;
    serve(&server, "/", 200, "<html><body><h1>Home</h1></body></html>").await;

    for (route, body) in [
        ("/robots.txt", "User-agent: *\nAllow: /\n"),
        ("/sitemap.xml", "<urlset><url><loc>x</loc></url></urlset>"),
        ("/llms.txt", "# Site\n"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
    }

    let started = Instant::now();
    let data = crawl(&server.uri(), &test_options()).await.unwrap();
    let elapsed = started.elapsed();

    assert!(data.robots_txt.is_some());
    assert!(data.sitemap_xml.is_some());
    assert!(data.llms_txt.is_some());
    // Three 300ms responses in sequence would take at least 900ms
    assert!(elapsed < Duration::from_millis(800), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_primary_page_failure_aborts_audit() {
    let server = MockServer::start().await;
    serve(&server, "/", 404, "gone").await;

    let err = audit(&server.uri(), &test_options()).await.unwrap_err();

    assert!(matches!(
        err,
        AuditError::Fetch(FetchError::Http { status: 404, .. })
    ));
    assert!(err.hint().is_some());
}

#[tokio::test]
async fn test_local_build_directory_matches_root_index() {
    let page = "<html><head><title>Local project page</title></head><body><main><h1>Local</h1></main></body></html>";

    let root = TempDir::new().unwrap();
    fs::write(root.path().join("index.html"), page).unwrap();

    let built = TempDir::new().unwrap();
    fs::create_dir(built.path().join("dist")).unwrap();
    fs::write(built.path().join("dist").join("index.html"), page).unwrap();

    let target_root = root.path().to_string_lossy().to_string();
    let target_built = built.path().to_string_lossy().to_string();

    let from_root = audit(&target_root, &test_options()).await.unwrap();
    let from_built = audit(&target_built, &test_options()).await.unwrap();

    assert_eq!(from_root.rules, from_built.rules);
    assert_eq!(from_root.total_score, from_built.total_score);
    assert_eq!(rule(&from_root, "has-main").score, 5);
}

#[tokio::test]
async fn test_local_auxiliary_files_from_public_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.html"),
        "<html><body><h1>x</h1></body></html>",
    )
    .unwrap();
    fs::create_dir(dir.path().join("public")).unwrap();
    fs::write(
        dir.path().join("public").join("robots.txt"),
        "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n",
    )
    .unwrap();

    let target = dir.path().to_string_lossy().to_string();
    let data = crawl(&target, &test_options()).await.unwrap();
    assert!(data.is_local);
    assert!(data.robots_txt.is_some());

    let result = audit(&target, &test_options()).await.unwrap();
    assert_eq!(rule(&result, "has-robots").score, 4);
}

#[tokio::test]
async fn test_local_latin1_page_is_audited() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.html"),
        b"<html><head><title>Caf\xe9 du coin, Paris</title></head><body><h1>Caf\xe9</h1></body></html>",
    )
    .unwrap();

    let result = audit(&dir.path().to_string_lossy(), &test_options())
        .await
        .unwrap();

    assert_eq!(rule(&result, "single-h1").score, 5);
    assert_eq!(rule(&result, "has-title").score, 5);
}

#[tokio::test]
async fn test_local_directory_without_html() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "# nothing here").unwrap();

    let err = audit(&dir.path().to_string_lossy(), &test_options())
        .await
        .unwrap_err();

    match err {
        AuditError::LocalNotFound { searched, .. } => {
            assert!(searched.iter().any(|s| s.contains("index.html")));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
