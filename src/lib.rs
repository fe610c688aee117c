//! CIPWE: an AI-crawlability auditor for web pages
//!
//! This crate fetches a page together with its `robots.txt`, `sitemap.xml` and
//! `llms.txt`, runs a fixed battery of independent checks against the fetched
//! content, and aggregates the outcomes into a weighted 100-point score.
//!
//! # Example
//!
//! ```no_run
//! use cipwe::crawler::FetchOptions;
//!
//! # async fn run() -> cipwe::Result<()> {
//! let result = cipwe::audit("example.com", &FetchOptions::default()).await?;
//! println!("{} {}/{} ({})", result.grade_emoji, result.total_score, result.max_score, result.grade);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod output;
pub mod scoring;
pub mod types;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for audit operations
///
/// Only a failed primary fetch, an undiscoverable local page, or a malformed
/// target aborts an audit. Everything else degrades into a lower score.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No HTML file found in {}. Looked in: {}", path.display(), searched.join(", "))]
    LocalNotFound { path: PathBuf, searched: Vec<String> },

    #[error("Invalid target: {0}")]
    InvalidTarget(#[from] UrlError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Returns a user-facing remediation hint, when one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(e) => Some(e.hint()),
            Self::LocalNotFound { .. } => {
                Some("Build your project first, or pass the directory that contains index.html.")
            }
            Self::InvalidTarget(_) => {
                Some("Pass a URL (https://example.com), a bare domain, or a local directory path.")
            }
            Self::Client(_) | Self::Config(_) | Self::Io(_) => None,
        }
    }
}

/// Classified failure of a remote fetch, surfaced after all recovery attempts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Connection refused: {url} - is the server running?")]
    ConnectionRefused { url: String },

    #[error("Request timed out after {timeout_ms}ms: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("TLS certificate error for {url}")]
    Tls { url: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("{message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// Returns the URL the failed request was aimed at
    pub fn url(&self) -> &str {
        match self {
            Self::ConnectionRefused { url }
            | Self::Timeout { url, .. }
            | Self::Tls { url }
            | Self::Http { url, .. }
            | Self::Other { url, .. } => url,
        }
    }

    /// Returns a user-facing remediation hint for this failure
    pub fn hint(&self) -> &'static str {
        match self {
            Self::ConnectionRefused { .. } => "The server refused the connection. Is it running?",
            Self::Timeout { .. } => {
                "The request timed out. Try: cipwe audit <url> --timeout 30000"
            }
            Self::Tls { .. } => {
                "TLS/certificate issue detected. Try: cipwe audit <url> --insecure"
            }
            Self::Http { .. } | Self::Other { .. } => {
                "Make sure the URL is accessible and returns HTML. For local projects, pass the directory path instead."
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{all_rules, evaluate};
pub use crawler::{crawl, FetchOptions};
pub use scoring::aggregate;
pub use types::{AuditResult, Category, CategoryScore, CrawlData, RuleResult};

/// Runs one full audit: crawl the target, evaluate every rule, aggregate
///
/// # Arguments
///
/// * `target` - A URL, a bare domain, or a local directory path
/// * `options` - Fetch behavior for remote targets
///
/// # Returns
///
/// * `Ok(AuditResult)` - The scored audit
/// * `Err(AuditError)` - The primary page could not be obtained
pub async fn audit(target: &str, options: &FetchOptions) -> Result<AuditResult> {
    let data = crawl(target, options).await?;
    let results = evaluate(&data);
    tracing::info!("Analyzed {} rules for {}", results.len(), data.url);
    Ok(aggregate(&data.url, results))
}
