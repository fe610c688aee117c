//! Crawl coordinator - gathers everything one audit needs
//!
//! For a remote target the primary page is fetched first and alone, so that
//! a TLS fallback it triggers is already in place when the three auxiliary
//! requests go out together.

use crate::crawler::fetcher::{FetchOptions, Fetcher, Transport};
use crate::crawler::local::{read_local_file, read_local_html};
use crate::types::CrawlData;
use crate::url::{auxiliary_url, resolve_target, with_default_scheme, Target};
use crate::AuditError;
use std::path::Path;
use url::Url;

/// Well-known auxiliary files fetched alongside the page
pub const ROBOTS_TXT: &str = "robots.txt";
pub const SITEMAP_XML: &str = "sitemap.xml";
pub const LLMS_TXT: &str = "llms.txt";

/// Crawls a target into an immutable snapshot
///
/// # Arguments
///
/// * `target` - A URL, a bare domain, or a local directory
/// * `options` - Fetch behavior for remote targets
///
/// # Returns
///
/// * `Ok(CrawlData)` - The snapshot
/// * `Err(AuditError)` - The primary HTML could not be obtained
pub async fn crawl(target: &str, options: &FetchOptions) -> Result<CrawlData, AuditError> {
    match resolve_target(target)? {
        Target::Remote(url) => {
            let fetcher = Fetcher::new(options.clone())?;
            let mut data = crawl_url(&fetcher, &url).await?;
            // Report the target as given, not the re-serialized URL
            data.url = with_default_scheme(target.trim());
            Ok(data)
        }
        Target::Local(dir) => crawl_local(&dir),
    }
}

/// Crawls a deployed site through the given fetcher
///
/// The fetcher's TLS latch is shared by all four requests.
pub async fn crawl_url<T: Transport>(fetcher: &Fetcher<T>, url: &Url) -> Result<CrawlData, AuditError> {
    tracing::info!("Fetching {}", url);
    let html = fetcher.fetch(url.as_str()).await?;

    let robots_url = auxiliary_url(url, ROBOTS_TXT);
    let sitemap_url = auxiliary_url(url, SITEMAP_XML);
    let llms_url = auxiliary_url(url, LLMS_TXT);

    let (robots_txt, sitemap_xml, llms_txt) = tokio::join!(
        fetch_auxiliary(fetcher, &robots_url),
        fetch_auxiliary(fetcher, &sitemap_url),
        fetch_auxiliary(fetcher, &llms_url),
    );

    tracing::info!(
        "Auxiliary files: robots.txt {}, sitemap.xml {}, llms.txt {}",
        found(&robots_txt),
        found(&sitemap_xml),
        found(&llms_txt)
    );

    Ok(CrawlData {
        url: url.to_string(),
        html,
        robots_txt,
        sitemap_xml,
        llms_txt,
        is_local: false,
    })
}

/// Crawls a project directory on disk
pub fn crawl_local(dir: &Path) -> Result<CrawlData, AuditError> {
    tracing::info!("Reading local project {}", dir.display());
    let html = read_local_html(dir)?;

    Ok(CrawlData {
        url: dir.display().to_string(),
        html,
        robots_txt: read_local_file(dir, ROBOTS_TXT),
        sitemap_xml: read_local_file(dir, SITEMAP_XML),
        llms_txt: read_local_file(dir, LLMS_TXT),
        is_local: true,
    })
}

async fn fetch_auxiliary<T: Transport>(fetcher: &Fetcher<T>, url: &str) -> Option<String> {
    let body = fetcher.try_fetch(url).await?;
    if looks_like_html(&body) {
        tracing::debug!("{} returned an HTML page, treating as absent", url);
        return None;
    }
    Some(body)
}

/// Detects a catch-all HTML page served in place of a missing text file
///
/// This is a heuristic: a genuine file that starts with an HTML tag is also
/// reported as absent.
pub fn looks_like_html(body: &str) -> bool {
    let start = body.trim_start();
    let prefix: String = start.chars().take(14).collect::<String>().to_lowercase();
    prefix.starts_with("<!doctype html") || prefix.starts_with("<html")
}

fn found(content: &Option<String>) -> &'static str {
    if content.is_some() {
        "found"
    } else {
        "absent"
    }
}
