//! Metadata rules (15 points)

use crate::analyzer::rules::semantic_html::excerpt;
use crate::analyzer::{Check, Document, Rule, RuleError, Verdict};
use crate::types::Category;

const REQUIRED_OG_TAGS: [&str; 3] = ["og:title", "og:description", "og:image"];
const BONUS_OG_TAGS: [&str; 3] = ["og:type", "og:url", "og:site_name"];

pub const HAS_TITLE: Rule = Rule {
    id: "has-title",
    name: "Page Title",
    description: "Check if the page has a meaningful <title> tag",
    category: Category::Metadata,
    weight: 5,
    check: Check::Document(has_title),
};

pub const HAS_META_DESCRIPTION: Rule = Rule {
    id: "has-meta-description",
    name: "Meta Description",
    description: "Check if the page has a meaningful meta description",
    category: Category::Metadata,
    weight: 5,
    check: Check::Document(has_meta_description),
};

pub const HAS_OPENGRAPH: Rule = Rule {
    id: "has-opengraph",
    name: "OpenGraph Tags",
    description: "Check for OpenGraph meta tags (og:title, og:description, og:image)",
    category: Category::Metadata,
    weight: 5,
    check: Check::Document(has_opengraph),
};

fn has_title(doc: &Document) -> Result<Verdict, RuleError> {
    let title = doc.text_of("title")?;
    let len = title.chars().count();

    if len == 0 {
        return Ok(Verdict::fail(
            0,
            "No <title> tag found",
            "Add a <title> tag with a clear, descriptive page title (50-60 characters)",
        ));
    }

    if len < 10 {
        return Ok(Verdict::fail(
            2,
            format!("Title is too short ({} chars): \"{}\"", len, title),
            "Expand your title to 50-60 characters for better AI agent understanding",
        ));
    }

    if len > 70 {
        return Ok(Verdict::pass(
            4,
            format!("Title is slightly long ({} chars): \"{}\"", len, excerpt(&title, 60)),
        ));
    }

    Ok(Verdict::pass(5, format!("Good title ({} chars): \"{}\"", len, title)))
}

fn has_meta_description(doc: &Document) -> Result<Verdict, RuleError> {
    let len = doc
        .attr(r#"meta[name="description"]"#, "content")?
        .map(|d| d.chars().count())
        .unwrap_or(0);

    if len == 0 {
        return Ok(Verdict::fail(
            0,
            "No meta description found",
            "Add <meta name=\"description\" content=\"...\"> with a clear 150-160 character summary. This is the first thing AI agents read to understand your page",
        ));
    }

    if len < 50 {
        return Ok(Verdict::fail(
            2,
            format!("Meta description is too short ({} chars)", len),
            "Expand to 150-160 characters for optimal AI comprehension",
        ));
    }

    if len > 170 {
        return Ok(Verdict::pass(
            4,
            format!("Meta description slightly long ({} chars) but present", len),
        ));
    }

    Ok(Verdict::pass(5, format!("Good meta description ({} chars)", len)))
}

fn has_opengraph(doc: &Document) -> Result<Verdict, RuleError> {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for tag in REQUIRED_OG_TAGS {
        if og_content(doc, tag)?.is_some() {
            found.push(tag);
        } else {
            missing.push(tag);
        }
    }

    if missing.is_empty() {
        let mut bonus = Vec::new();
        for tag in BONUS_OG_TAGS {
            if og_content(doc, tag)?.is_some() {
                bonus.push(tag);
            }
        }
        let twitter_card = doc.attr(r#"meta[name="twitter:card"]"#, "content")?.is_some()
            || doc.attr(r#"meta[property="twitter:card"]"#, "content")?.is_some();

        let mut message = String::from("All OpenGraph tags present");
        if !bonus.is_empty() {
            message.push_str(&format!(" + {}", bonus.join(", ")));
        }
        if twitter_card {
            message.push_str(" + Twitter Card");
        }
        return Ok(Verdict::pass(5, message));
    }

    if !found.is_empty() {
        let tags: Vec<String> = missing
            .iter()
            .map(|t| format!("<meta property=\"{}\" content=\"...\">", t))
            .collect();
        return Ok(Verdict::fail(
            partial_score(found.len(), REQUIRED_OG_TAGS.len(), 4),
            format!(
                "Partial OpenGraph: found {}, missing {}",
                found.join(", "),
                missing.join(", ")
            ),
            format!("Add missing tags: {}", tags.join(", ")),
        ));
    }

    Ok(Verdict::fail(
        0,
        "No OpenGraph tags found",
        "Add og:title, og:description, and og:image meta tags. AI agents and social platforms use these to understand and preview your content",
    ))
}

fn og_content(doc: &Document, property: &str) -> Result<Option<String>, RuleError> {
    doc.attr(&format!(r#"meta[property="{}"]"#, property), "content")
}

/// `round(found / total * scale)` with halves rounded up
fn partial_score(found: usize, total: usize, scale: u32) -> u32 {
    let (found, total) = (found as u32, total as u32);
    (2 * found * scale + total) / (2 * total)
}
