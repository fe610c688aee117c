//! Output module for rendering audit results
//!
//! This module handles:
//! - The colored terminal report
//! - Pretty JSON for CI pipelines
//! - Markdown reports written to disk

mod json;
mod markdown;
mod report;
mod traits;

pub use json::{error_json, JsonReport};
pub use markdown::{format_markdown_report, write_markdown_report, MarkdownReport};
pub use report::{score_line, TerminalReport};
pub use traits::{OutputError, OutputResult, ReportRenderer};
