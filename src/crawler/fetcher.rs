//! HTTP fetcher implementation
//!
//! This module handles every remote request of an audit, including:
//! - Building HTTP clients with the configured user agent
//! - Per-attempt timeouts
//! - Retry with linear back-off for transient failures
//! - Automatic TLS fallback for self-signed or otherwise unverifiable sites
//! - Classification of the final failure

use crate::crawler::classify::{classify, root_message, BoxError, FailureClass, TimerExpired};
use crate::FetchError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "CIPWE-Bot/0.1 (+https://cipwe.someshghosh.me)";

/// `Accept` header for the primary page
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Status codes that are retried rather than surfaced immediately
const RETRY_STATUS_CODES: &[u16] = &[429, 500, 502, 503, 504];

/// Options controlling remote fetches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Per-attempt timeout
    pub timeout: Duration,

    /// Retries allowed after the first attempt
    pub max_retries: u32,

    /// Skip certificate verification from the start
    pub insecure_tls: bool,

    /// Back-off unit; the n-th retry waits `n * retry_backoff`
    pub retry_backoff: Duration,

    /// User agent header value
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(15_000),
            max_retries: 2,
            insecure_tls: false,
            retry_backoff: Duration::from_millis(1_000),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Per-audit shared state
///
/// Holds the TLS fallback latch. Once a certificate failure flips it, every
/// later request made through the same context uses relaxed verification.
/// The latch never resets.
#[derive(Debug, Default)]
pub struct FetchContext {
    tls_relaxed: AtomicBool,
}

impl FetchContext {
    /// Creates a context, starting relaxed when insecure mode was requested
    pub fn new(insecure_tls: bool) -> Self {
        Self {
            tls_relaxed: AtomicBool::new(insecure_tls),
        }
    }

    /// Returns true if certificate verification is currently disabled
    pub fn is_tls_relaxed(&self) -> bool {
        self.tls_relaxed.load(Ordering::SeqCst)
    }

    /// Flips the latch to relaxed
    ///
    /// # Returns
    ///
    /// * `true` - This call performed the transition
    /// * `false` - The context was already relaxed
    pub fn activate_tls_fallback(&self) -> bool {
        self.tls_relaxed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Raw response of a single request attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl RawResponse {
    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single-attempt HTTP GET
///
/// The fetcher owns all resilience logic; transports only perform one request
/// and report what happened.
pub trait Transport: Send + Sync {
    /// Performs one GET request
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to request
    /// * `accept` - Optional `Accept` header value
    /// * `relaxed_tls` - Skip certificate verification for this request
    fn get(
        &self,
        url: &str,
        accept: Option<&str>,
        relaxed_tls: bool,
    ) -> impl Future<Output = Result<RawResponse, BoxError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent header value
/// * `timeout` - Overall request timeout
/// * `accept_invalid_certs` - Disable certificate verification
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use cipwe::crawler::{build_http_client, DEFAULT_USER_AGENT};
/// use std::time::Duration;
///
/// let client = build_http_client(DEFAULT_USER_AGENT, Duration::from_secs(15), false).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &str,
    timeout: Duration,
    accept_invalid_certs: bool,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Transport over `reqwest`, with one verifying and one relaxed client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    strict: Client,
    relaxed: Client,
}

impl HttpTransport {
    /// Builds both clients for the given options
    pub fn new(options: &FetchOptions) -> Result<Self, reqwest::Error> {
        Ok(Self {
            strict: build_http_client(&options.user_agent, options.timeout, false)?,
            relaxed: build_http_client(&options.user_agent, options.timeout, true)?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        url: &str,
        accept: Option<&str>,
        relaxed_tls: bool,
    ) -> impl Future<Output = Result<RawResponse, BoxError>> + Send {
        let client = if relaxed_tls {
            &self.relaxed
        } else {
            &self.strict
        };
        let mut request = client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        }
    }
}

/// Resilient fetcher for one audit invocation
pub struct Fetcher<T = HttpTransport> {
    transport: T,
    context: FetchContext,
    options: FetchOptions,
}

impl Fetcher<HttpTransport> {
    /// Creates a fetcher backed by real HTTP clients
    pub fn new(options: FetchOptions) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(&options)?;
        Ok(Self::with_transport(transport, options))
    }
}

impl<T: Transport> Fetcher<T> {
    /// Creates a fetcher over an arbitrary transport
    pub fn with_transport(transport: T, options: FetchOptions) -> Self {
        Self {
            context: FetchContext::new(options.insecure_tls),
            transport,
            options,
        }
    }

    /// Returns the per-audit context
    pub fn context(&self) -> &FetchContext {
        &self.context
    }

    /// Returns the options this fetcher was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetches a page body, surfacing a classified error when all recovery fails
    ///
    /// # Recovery Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx | Return body |
    /// | HTTP 429, 500, 502, 503, 504 | Retry with back-off, then `Http` |
    /// | Other non-2xx | Immediate `Http` |
    /// | Timeout, reset, broken pipe | Retry with back-off, then surface |
    /// | TLS error while verifying | Relax verification, retry with a fresh budget |
    /// | TLS error while relaxed | Immediate `Tls` |
    /// | Connection refused | Immediate `ConnectionRefused` |
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to fetch
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_with_accept(url, Some(HTML_ACCEPT)).await
    }

    /// Best-effort fetch for files whose absence is normal
    ///
    /// Uses the same retry and TLS fallback logic as [`Fetcher::fetch`], but
    /// any final failure becomes `None`.
    pub async fn try_fetch(&self, url: &str) -> Option<String> {
        match self.fetch_with_accept(url, None).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Treating {} as absent: {}", url, e);
                None
            }
        }
    }

    async fn fetch_with_accept(&self, url: &str, accept: Option<&str>) -> Result<String, FetchError> {
        let mut attempt: u32 = 0;
        let mut fallback_used = false;

        loop {
            let relaxed = self.context.is_tls_relaxed();
            tracing::debug!(
                "GET {} (attempt {}, relaxed TLS: {})",
                url,
                attempt + 1,
                relaxed
            );

            let request = self.transport.get(url, accept, relaxed);
            let outcome = match tokio::time::timeout(self.options.timeout, request).await {
                Ok(result) => result,
                Err(_) => Err(Box::new(TimerExpired) as BoxError),
            };

            let err = match outcome {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => {
                    let retryable = RETRY_STATUS_CODES.contains(&response.status);
                    if retryable && attempt < self.options.max_retries {
                        attempt += 1;
                        tracing::debug!("HTTP {} from {}, retrying", response.status, url);
                        self.back_off(attempt).await;
                        continue;
                    }
                    return Err(FetchError::Http {
                        url: url.to_string(),
                        status: response.status,
                    });
                }
                Err(err) => err,
            };

            let class = classify(err.as_ref());

            if class == FailureClass::Tls && !relaxed && !fallback_used {
                if self.context.activate_tls_fallback() {
                    tracing::warn!(
                        "TLS certificate error detected for {} - retrying with verification disabled (use --insecure to skip this check upfront)",
                        url
                    );
                }
                fallback_used = true;
                attempt = 0;
                continue;
            }

            if class.is_retryable() && attempt < self.options.max_retries {
                attempt += 1;
                tracing::debug!("Transient error for {}: {}, retrying", url, err);
                self.back_off(attempt).await;
                continue;
            }

            return Err(self.surface(url, class, err.as_ref()));
        }
    }

    async fn back_off(&self, attempt: u32) {
        tokio::time::sleep(self.options.retry_backoff * attempt).await;
    }

    fn surface(
        &self,
        url: &str,
        class: FailureClass,
        err: &(dyn std::error::Error + 'static),
    ) -> FetchError {
        let url = url.to_string();
        match class {
            FailureClass::ConnectionRefused => FetchError::ConnectionRefused { url },
            FailureClass::Timeout => FetchError::Timeout {
                url,
                timeout_ms: self.options.timeout.as_millis() as u64,
            },
            FailureClass::Tls => FetchError::Tls { url },
            FailureClass::Transient | FailureClass::Other => FetchError::Other {
                url,
                message: root_message(err),
            },
        }
    }
}
