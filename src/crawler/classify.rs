//! Failure classification for fetch errors
//!
//! HTTP client errors arrive wrapped in several layers (client error, protocol
//! error, connector error, OS error). Classification walks the whole
//! `source()` chain and reports the first layer that identifies a known
//! failure kind.

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Boxed error type carried across the transport seam
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Raised when an attempt outlives its timer and is abandoned
#[derive(Debug, Error)]
#[error("request timed out")]
pub struct TimerExpired;

/// What went wrong with a single request attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Nothing is listening on the target port
    ConnectionRefused,
    /// The attempt timed out, either by our timer or in the OS
    Timeout,
    /// Certificate verification or TLS handshake failed
    Tls,
    /// A network hiccup worth retrying (reset, broken pipe, DNS "try again")
    Transient,
    /// Anything else
    Other,
}

impl FailureClass {
    /// Returns true if a retry with back-off may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transient)
    }
}

/// Substrings that mark a TLS or certificate failure in an error message
const TLS_MARKERS: &[&str] = &[
    "self-signed",
    "self_signed",
    "self signed",
    "cert",
    "ssl",
    "tls",
    "unable to verify",
    "unable to get local issuer",
    "unknownissuer",
];

/// Substrings that mark a transient resolver or socket failure
const TRANSIENT_MARKERS: &[&str] = &[
    "temporary failure in name resolution",
    "try again",
    "connection reset",
    "broken pipe",
];

/// Messages that say nothing beyond "something failed"
const GENERIC_MESSAGES: &[&str] = &["fetch failed", "error sending request", "request failed"];

/// Iterates over an error and all of its causes, outermost first
pub fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |e| (*e).source())
}

/// Classifies an error by walking its cause chain
///
/// # Arguments
///
/// * `err` - The outermost error of the chain
///
/// # Returns
///
/// The class of the first layer that identifies one, or `Other`
pub fn classify(err: &(dyn StdError + 'static)) -> FailureClass {
    chain(err)
        .find_map(classify_layer)
        .unwrap_or(FailureClass::Other)
}

fn classify_layer(err: &(dyn StdError + 'static)) -> Option<FailureClass> {
    if err.is::<TimerExpired>() {
        return Some(FailureClass::Timeout);
    }

    if let Some(e) = err.downcast_ref::<reqwest::Error>() {
        // The client's own message embeds the URL, which may contain any of
        // the markers; only its flags are trusted.
        return e.is_timeout().then_some(FailureClass::Timeout);
    }

    if let Some(e) = err.downcast_ref::<io::Error>() {
        match e.kind() {
            io::ErrorKind::ConnectionRefused => return Some(FailureClass::ConnectionRefused),
            io::ErrorKind::TimedOut => return Some(FailureClass::Timeout),
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => return Some(FailureClass::Transient),
            _ => {}
        }
    }

    classify_message(&err.to_string())
}

fn classify_message(message: &str) -> Option<FailureClass> {
    let message = message.to_lowercase();

    if TLS_MARKERS.iter().any(|m| message.contains(m)) {
        Some(FailureClass::Tls)
    } else if message.contains("connection refused") {
        Some(FailureClass::ConnectionRefused)
    } else if message.contains("timed out") {
        Some(FailureClass::Timeout)
    } else if TRANSIENT_MARKERS.iter().any(|m| message.contains(m)) {
        Some(FailureClass::Transient)
    } else {
        None
    }
}

/// Returns the most specific human-readable message in the chain
///
/// The deepest layer usually carries the real reason; wrappers with generic
/// messages such as "error sending request" are skipped.
pub fn root_message(err: &(dyn StdError + 'static)) -> String {
    let messages: Vec<String> = chain(err).map(|e| e.to_string()).collect();

    messages
        .iter()
        .rev()
        .find(|m| !m.is_empty() && !is_generic(m))
        .or_else(|| messages.first())
        .cloned()
        .unwrap_or_else(|| "Unknown error".to_string())
}

fn is_generic(message: &str) -> bool {
    let message = message.to_lowercase();
    GENERIC_MESSAGES.iter().any(|g| message.starts_with(g))
}
