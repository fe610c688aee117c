//! Renderer trait and output errors

use crate::types::AuditResult;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Turns an audit into one presentation format
///
/// Renderers are pure: they return the full document and leave writing it
/// to the caller.
pub trait ReportRenderer {
    /// Renders the complete report
    ///
    /// # Arguments
    ///
    /// * `audit` - The finished audit
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rendered document
    /// * `Err(OutputError)` - Rendering failed
    fn render(&self, audit: &AuditResult) -> OutputResult<String>;
}
