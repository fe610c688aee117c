//! Shared data types for the audit pipeline
//!
//! These types flow from the crawler through the analyzer into the scoring
//! aggregator. Everything that leaves the crate is serialized in camelCase,
//! which is the shape downstream renderers and fix generators consume.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable snapshot of everything fetched for one audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlData {
    /// The normalized URL (or local path) that was audited
    pub url: String,

    /// The primary HTML document
    pub html: String,

    /// `/robots.txt` content, `None` when not found
    pub robots_txt: Option<String>,

    /// `/sitemap.xml` content, `None` when not found
    pub sitemap_xml: Option<String>,

    /// `/llms.txt` content, `None` when not found
    pub llms_txt: Option<String>,

    /// Whether the content came from a local directory
    pub is_local: bool,
}

impl CrawlData {
    /// Creates a snapshot holding only HTML, with every auxiliary file absent
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            robots_txt: None,
            sitemap_xml: None,
            llms_txt: None,
            is_local: false,
        }
    }
}

/// The six fixed rule groupings, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    StructuredData,
    SemanticHtml,
    Metadata,
    CrawlSignals,
    ContentClarity,
    AgentSignals,
}

impl Category {
    /// All categories in their fixed display order
    pub const ALL: [Category; 6] = [
        Category::StructuredData,
        Category::SemanticHtml,
        Category::Metadata,
        Category::CrawlSignals,
        Category::ContentClarity,
        Category::AgentSignals,
    ];

    /// Human-readable category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::StructuredData => "Structured Data",
            Self::SemanticHtml => "Semantic HTML",
            Self::Metadata => "Metadata",
            Self::CrawlSignals => "Crawl Signals",
            Self::ContentClarity => "Content Clarity",
            Self::AgentSignals => "Agent Signals",
        }
    }

    /// Documented point budget of the category in the full rule set
    pub fn documented_max(&self) -> u32 {
        match self {
            Self::StructuredData => 30,
            Self::SemanticHtml => 20,
            Self::Metadata => 15,
            Self::CrawlSignals => 15,
            Self::ContentClarity => 10,
            Self::AgentSignals => 10,
        }
    }

    /// Stable kebab-case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredData => "structured-data",
            Self::SemanticHtml => "semantic-html",
            Self::Metadata => "metadata",
            Self::CrawlSignals => "crawl-signals",
            Self::ContentClarity => "content-clarity",
            Self::AgentSignals => "agent-signals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of one rule against one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub rule_id: String,
    pub rule_name: String,
    pub category: Category,
    pub passed: bool,
    /// Points earned, never above `max_score`
    pub score: u32,
    /// Always equal to the rule's weight
    pub max_score: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Aggregated points for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    pub category_name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
}

/// Final, immutable artifact of one audit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub grade: String,
    pub grade_emoji: String,
    pub categories: Vec<CategoryScore>,
    pub rules: Vec<RuleResult>,
    pub passed_count: usize,
    pub failed_count: usize,
    /// RFC 3339 UTC timestamp of when the result was assembled
    pub timestamp: String,
}

impl AuditResult {
    /// Iterates over the rules that passed, in registration order
    pub fn passed(&self) -> impl Iterator<Item = &RuleResult> {
        self.rules.iter().filter(|r| r.passed)
    }

    /// Iterates over the rules that failed, in registration order
    pub fn failed(&self) -> impl Iterator<Item = &RuleResult> {
        self.rules.iter().filter(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_documented_max_totals_100() {
        let total: u32 = Category::ALL.iter().map(|c| c.documented_max()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        let json = serde_json::to_string(&Category::CrawlSignals).unwrap();
        assert_eq!(json, "\"crawl-signals\"");
        assert_eq!(Category::CrawlSignals.as_str(), "crawl-signals");
    }

    #[test]
    fn test_rule_result_serializes_camel_case() {
        let result = RuleResult {
            rule_id: "has-title".to_string(),
            rule_name: "Page Title".to_string(),
            category: Category::Metadata,
            passed: true,
            score: 5,
            max_score: 5,
            message: "ok".to_string(),
            suggestion: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ruleId"], "has-title");
        assert_eq!(value["maxScore"], 5);
        assert!(value.get("suggestion").is_none());
    }

    #[test]
    fn test_crawl_data_from_html() {
        let data = CrawlData::from_html("https://example.com", "<html></html>");
        assert!(data.robots_txt.is_none());
        assert!(data.sitemap_xml.is_none());
        assert!(data.llms_txt.is_none());
        assert!(!data.is_local);
    }
}
