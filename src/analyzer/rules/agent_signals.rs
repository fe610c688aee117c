//! Agent signal rules (10 points)

use crate::analyzer::{AuxFile, Check, Document, Rule, RuleError, Verdict};
use crate::types::Category;
use regex::Regex;

/// Selector for in-page summary blocks
const SUMMARY_BLOCKS: &str =
    r#"[class*="abstract"], [class*="summary"], [class*="description"], [class*="intro"]"#;

pub const HAS_LLMS_TXT: Rule = Rule {
    id: "has-llms-txt",
    name: "llms.txt",
    description: "Check if llms.txt file exists (AI agent directive file)",
    category: Category::AgentSignals,
    weight: 5,
    check: Check::AuxFile {
        file: AuxFile::LlmsTxt,
        check: has_llms_txt,
    },
};

pub const HAS_STRUCTURED_SUMMARY: Rule = Rule {
    id: "has-structured-summary",
    name: "Structured Summary",
    description: "Check if the page provides a clear, machine-readable summary of its content",
    category: Category::AgentSignals,
    weight: 5,
    check: Check::Document(has_structured_summary),
};

fn has_llms_txt(llms: Option<&str>) -> Result<Verdict, RuleError> {
    let Some(content) = llms.filter(|c| !c.is_empty()) else {
        return Ok(Verdict::fail(
            0,
            "No llms.txt found",
            "Create a llms.txt file at your site root describing your site's purpose, content, and AI usage policy. This emerging standard helps LLMs understand your site intent",
        ));
    };

    let content = content.trim();
    let lines = content.lines().filter(|l| !l.trim().is_empty()).count();

    let title = Regex::new(r"(?m)^#\s")?;
    let links = Regex::new(r"(?i)https?://")?;
    let sections = Regex::new(r"(?m)^(>|##\s)")?;

    let quality = [
        title.is_match(content),
        content.chars().count() > 100,
        links.is_match(content),
        sections.is_match(content),
    ]
    .iter()
    .filter(|signal| **signal)
    .count();

    if quality >= 3 {
        return Ok(Verdict::pass(
            5,
            format!("Rich llms.txt found ({} lines with structured content)", lines),
        ));
    }

    if quality >= 1 {
        return Ok(Verdict::pass(
            3,
            format!("llms.txt found but could be more comprehensive ({} lines)", lines),
        )
        .with_suggestion(
            "Enhance your llms.txt with: site title (# heading), description, key URLs, and content sections",
        ));
    }

    Ok(Verdict::pass(2, "llms.txt exists but is minimal").with_suggestion(
        "Add site description, purpose, primary content areas, and AI usage policy to llms.txt",
    ))
}

fn has_structured_summary(doc: &Document) -> Result<Verdict, RuleError> {
    let mut details: Vec<String> = Vec::new();

    let long_enough = |value: Option<String>| value.is_some_and(|v| v.chars().count() > 50);

    if long_enough(doc.attr(r#"meta[name="description"]"#, "content")?) {
        details.push("descriptive meta description".to_string());
    }
    if doc.attr(r#"meta[name="application-name"]"#, "content")?.is_some() {
        details.push("application-name meta".to_string());
    }
    if long_enough(doc.attr(r#"meta[property="og:description"]"#, "content")?) {
        details.push("rich og:description".to_string());
    }
    if let Some(lang) = doc.attr("html", "lang")? {
        details.push(format!("lang=\"{}\"", lang));
    }
    if doc.attr(r#"meta[name="author"]"#, "content")?.is_some() {
        details.push("author meta".to_string());
    }
    if doc.attr(r#"meta[name="keywords"]"#, "content")?.is_some() {
        details.push("keywords meta".to_string());
    }
    if doc.count(SUMMARY_BLOCKS)? > 0 {
        details.push("content summary section".to_string());
    }

    let signals = details.len();

    if signals >= 4 {
        return Ok(Verdict::pass(
            5,
            format!("Strong AI-readable summary signals: {}", details.join(", ")),
        ));
    }

    if signals >= 2 {
        return Ok(
            Verdict::pass(3, format!("Some summary signals: {}", details.join(", ")))
                .with_suggestion(
                    "Add more metadata (lang attribute, author, keywords) to help AI agents quickly understand your content",
                ),
        );
    }

    Ok(Verdict::fail(
        if signals > 0 { 1 } else { 0 },
        "Weak page summary signals for AI agents",
        "Add comprehensive metadata: lang attribute on <html>, meta description > 50 chars, meta author, og:description. These help AI agents quickly summarize your page",
    ))
}
