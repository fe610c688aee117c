//! Markdown report generation
//!
//! Produces a self-contained markdown document, suitable for CI artifacts
//! and pull request comments.

use crate::output::traits::{OutputResult, ReportRenderer};
use crate::types::AuditResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Markdown rendering of an audit
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReport;

impl ReportRenderer for MarkdownReport {
    fn render(&self, audit: &AuditResult) -> OutputResult<String> {
        Ok(format_markdown_report(audit))
    }
}

/// Writes the markdown report of an audit to a file
///
/// # Arguments
///
/// * `audit` - The finished audit
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(audit: &AuditResult, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(audit);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an audit as markdown
pub fn format_markdown_report(audit: &AuditResult) -> String {
    let mut md = String::new();

    md.push_str("# CIPWE Audit Report\n\n");

    md.push_str(&format!("- **Target**: {}\n", audit.url));
    md.push_str(&format!(
        "- **Score**: {}/{} ({}%)\n",
        audit.total_score, audit.max_score, audit.percentage
    ));
    md.push_str(&format!("- **Grade**: {} {}\n", audit.grade_emoji, audit.grade));
    md.push_str(&format!(
        "- **Checks**: {} passed, {} failed\n",
        audit.passed_count, audit.failed_count
    ));
    md.push_str(&format!("- **Generated**: {}\n\n", audit.timestamp));

    md.push_str("## Category Scores\n\n");
    md.push_str("| Category | Score | Percentage |\n");
    md.push_str("|----------|-------|------------|\n");
    for cat in &audit.categories {
        md.push_str(&format!(
            "| {} | {}/{} | {}% |\n",
            cat.category_name, cat.score, cat.max_score, cat.percentage
        ));
    }
    md.push('\n');

    if audit.failed_count > 0 {
        md.push_str(&format!("## Issues ({})\n\n", audit.failed_count));
        for rule in audit.failed() {
            md.push_str(&format!(
                "- **{}** ({}/{}): {}\n",
                rule.rule_name, rule.score, rule.max_score, rule.message
            ));
            if let Some(suggestion) = &rule.suggestion {
                md.push_str(&format!("  - {}\n", suggestion));
            }
        }
        md.push('\n');
    }

    if audit.passed_count > 0 {
        md.push_str(&format!("## Passed ({})\n\n", audit.passed_count));
        for rule in audit.passed() {
            md.push_str(&format!("- **{}**: {}\n", rule.rule_name, rule.message));
        }
        md.push('\n');
    }

    md
}
