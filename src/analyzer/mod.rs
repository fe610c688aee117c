//! Rule registry and evaluation engine
//!
//! Every check is a [`Rule`]: static metadata plus exactly one evaluation
//! capability. Document rules see the parsed page; auxiliary-file rules see
//! only the raw text of one well-known file. The engine runs each rule in
//! isolation, so a failing rule costs its own points and nothing else.

mod document;
pub mod rules;

pub use document::{has_ancestor, visible_text, Document, JsonLd};
pub use rules::all_rules;

use crate::types::{Category, CrawlData, RuleResult};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Errors a rule can raise while evaluating
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

/// A rule's judgement before it is stamped with the rule's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub score: u32,
    pub message: String,
    pub suggestion: Option<String>,
}

impl Verdict {
    /// A passing verdict without suggestion
    pub fn pass(score: u32, message: impl Into<String>) -> Self {
        Self {
            passed: true,
            score,
            message: message.into(),
            suggestion: None,
        }
    }

    /// A failing verdict with a suggestion for the fix
    pub fn fail(score: u32, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            passed: false,
            score,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    /// Attaches a suggestion, for passing verdicts that still have room to improve
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Evaluation over the parsed page
pub type DocumentCheck = fn(&Document) -> Result<Verdict, RuleError>;

/// Evaluation over one auxiliary file, `None` when it was not found
pub type AuxCheck = fn(Option<&str>) -> Result<Verdict, RuleError>;

/// The well-known files fetched next to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxFile {
    RobotsTxt,
    SitemapXml,
    LlmsTxt,
}

impl AuxFile {
    /// Returns this file's content from a snapshot
    pub fn content<'a>(&self, data: &'a CrawlData) -> Option<&'a str> {
        match self {
            Self::RobotsTxt => data.robots_txt.as_deref(),
            Self::SitemapXml => data.sitemap_xml.as_deref(),
            Self::LlmsTxt => data.llms_txt.as_deref(),
        }
    }
}

/// The single capability a rule is granted
#[derive(Clone, Copy)]
pub enum Check {
    /// Reads the parsed HTML document
    Document(DocumentCheck),
    /// Reads the raw text of one auxiliary file
    AuxFile { file: AuxFile, check: AuxCheck },
}

/// One independently scored check
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, used by downstream tooling
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Maximum points
    pub weight: u32,
    pub check: Check,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("weight", &self.weight)
            .finish()
    }
}

impl Rule {
    /// Runs the rule, converting any error or panic into a zero-score result
    ///
    /// The returned `max_score` is always the rule's weight.
    pub fn evaluate(&self, data: &CrawlData, document: &Document) -> RuleResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match self.check {
            Check::Document(check) => check(document),
            Check::AuxFile { file, check } => check(file.content(data)),
        }));

        match outcome {
            Ok(Ok(verdict)) => self.stamp(verdict),
            Ok(Err(e)) => self.error_result(&e.to_string()),
            Err(payload) => self.error_result(&panic_message(payload.as_ref())),
        }
    }

    fn stamp(&self, verdict: Verdict) -> RuleResult {
        let score = if verdict.score > self.weight {
            tracing::warn!(
                "Rule {} scored {} above its weight {}, clamping",
                self.id,
                verdict.score,
                self.weight
            );
            self.weight
        } else {
            verdict.score
        };

        RuleResult {
            rule_id: self.id.to_string(),
            rule_name: self.name.to_string(),
            category: self.category,
            passed: verdict.passed,
            score,
            max_score: self.weight,
            message: verdict.message,
            suggestion: verdict.suggestion,
        }
    }

    fn error_result(&self, message: &str) -> RuleResult {
        tracing::warn!("Rule {} failed: {}", self.id, message);
        RuleResult {
            rule_id: self.id.to_string(),
            rule_name: self.name.to_string(),
            category: self.category,
            passed: false,
            score: 0,
            max_score: self.weight,
            message: format!("Rule error: {}", message),
            suggestion: Some("This rule encountered an error during analysis".to_string()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error".to_string()
    }
}

/// Runs the full registered rule set against a snapshot
///
/// Returns exactly one result per rule, in registration order.
pub fn evaluate(data: &CrawlData) -> Vec<RuleResult> {
    evaluate_with(all_rules(), data)
}

/// Runs an arbitrary rule list against a snapshot
pub fn evaluate_with(rules: &[Rule], data: &CrawlData) -> Vec<RuleResult> {
    let document = Document::parse(&data.html);
    rules
        .iter()
        .map(|rule| {
            let result = rule.evaluate(data, &document);
            tracing::debug!(
                "{}: {}/{} ({})",
                rule.id,
                result.score,
                result.max_score,
                if result.passed { "pass" } else { "fail" }
            );
            result
        })
        .collect()
}
