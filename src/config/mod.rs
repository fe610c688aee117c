//! Configuration module for CIPWE
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and turning it into [`FetchOptions`].
//!
//! # Example
//!
//! ```no_run
//! use cipwe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cipwe.toml")).unwrap();
//! println!("Retries: {}", config.fetch.retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_fetch_config};

use crate::crawler::FetchOptions;
use std::time::Duration;

impl Config {
    /// Builds fetch options from this configuration
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_millis(self.fetch.timeout_ms),
            max_retries: self.fetch.retries,
            insecure_tls: self.fetch.insecure,
            retry_backoff: Duration::from_millis(self.fetch.retry_backoff_ms),
            user_agent: self.user_agent.header_value(),
        }
    }
}
