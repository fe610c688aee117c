//! JSON rendering for CI pipelines
//!
//! Field names are camelCase (`ruleId`, `maxScore`, `passedCount`, ...);
//! downstream tooling reads this shape.

use crate::output::traits::{OutputResult, ReportRenderer};
use crate::types::AuditResult;
use serde_json::json;

/// Pretty-printed JSON of the full [`AuditResult`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportRenderer for JsonReport {
    fn render(&self, audit: &AuditResult) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(audit)?)
    }
}

/// Error object printed on stderr when an audit fails in JSON mode
pub fn error_json(message: &str) -> String {
    json!({ "error": true, "message": message }).to_string()
}
