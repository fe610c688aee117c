//! Crawler module for gathering audit inputs
//!
//! This module contains everything that turns a target into a `CrawlData`
//! snapshot, including:
//! - HTTP fetching with timeouts, retries and TLS fallback
//! - Classification of fetch failures
//! - Local project discovery
//! - Overall crawl coordination

mod classify;
mod coordinator;
mod fetcher;
mod local;

pub use classify::{classify, root_message, BoxError, FailureClass, TimerExpired};
pub use coordinator::{crawl, crawl_local, crawl_url, looks_like_html, LLMS_TXT, ROBOTS_TXT, SITEMAP_XML};
pub use fetcher::{
    build_http_client, FetchContext, FetchOptions, Fetcher, HttpTransport, RawResponse, Transport,
    DEFAULT_USER_AGENT,
};
pub use local::{find_local_html, read_local_file, read_local_html};
