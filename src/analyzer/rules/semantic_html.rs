//! Semantic HTML rules (20 points)

use crate::analyzer::{visible_text, Check, Document, Rule, RuleError, Verdict};
use crate::types::Category;

/// Longest H1 excerpt quoted in a message
const H1_EXCERPT_CHARS: usize = 60;

pub const SINGLE_H1: Rule = Rule {
    id: "single-h1",
    name: "Single H1 Tag",
    description: "Check that the page has exactly one H1 heading",
    category: Category::SemanticHtml,
    weight: 5,
    check: Check::Document(single_h1),
};

pub const HEADING_HIERARCHY: Rule = Rule {
    id: "heading-hierarchy",
    name: "Heading Hierarchy",
    description: "Check that headings follow a logical hierarchy (H1 → H2 → H3)",
    category: Category::SemanticHtml,
    weight: 5,
    check: Check::Document(heading_hierarchy),
};

pub const HAS_MAIN: Rule = Rule {
    id: "has-main",
    name: "Has <main> Element",
    description: "Check if the page uses the semantic <main> element",
    category: Category::SemanticHtml,
    weight: 5,
    check: Check::Document(has_main),
};

pub const HAS_ARTICLE_SECTION: Rule = Rule {
    id: "has-article-section",
    name: "Has <article>/<section>",
    description: "Check if the page uses semantic sectioning elements",
    category: Category::SemanticHtml,
    weight: 5,
    check: Check::Document(has_article_section),
};

fn single_h1(doc: &Document) -> Result<Verdict, RuleError> {
    let headings = doc.select("h1")?;

    match headings.len() {
        1 => {
            let text = visible_text(headings[0]);
            Ok(Verdict::pass(
                5,
                format!("Single H1 found: \"{}\"", excerpt(text.trim(), H1_EXCERPT_CHARS)),
            ))
        }
        0 => Ok(Verdict::fail(
            0,
            "No H1 heading found on the page",
            "Add exactly one <h1> tag that clearly describes the page's primary topic",
        )),
        n => Ok(Verdict::fail(
            2,
            format!("Found {} H1 tags (should be exactly 1)", n),
            "Use only one <h1> per page. Use <h2>-<h6> for sub-sections. AI agents rely on H1 to understand the page's primary topic",
        )),
    }
}

fn heading_hierarchy(doc: &Document) -> Result<Verdict, RuleError> {
    let levels: Vec<u32> = doc
        .select("h1, h2, h3, h4, h5, h6")?
        .iter()
        .filter_map(|el| el.value().name().strip_prefix('h')?.parse().ok())
        .collect();

    if levels.is_empty() {
        return Ok(Verdict::fail(
            0,
            "No headings found on the page",
            "Add semantic headings (H1-H6) to structure your content. AI agents use heading hierarchy to understand content organization",
        ));
    }

    // Only downward jumps count; going back up any number of levels is fine
    let violations = levels.windows(2).filter(|w| w[1] > w[0] + 1).count();

    if violations == 0 {
        return Ok(Verdict::pass(
            5,
            format!(
                "Heading hierarchy is clean ({} headings, no skipped levels)",
                levels.len()
            ),
        ));
    }

    let score = if violations <= 2 { 3 } else { 1 };
    Ok(Verdict::fail(
        score,
        format!("{} heading hierarchy violation(s) - levels are skipped", violations),
        "Ensure headings follow a logical order: H1 → H2 → H3. Don't skip levels (e.g., H1 → H3). AI agents use this hierarchy to parse content structure",
    ))
}

fn has_main(doc: &Document) -> Result<Verdict, RuleError> {
    let mains = doc.count("main")?;

    if mains == 1 {
        return Ok(Verdict::pass(
            5,
            "<main> element found - content region is clearly defined",
        ));
    }

    if mains > 1 {
        return Ok(Verdict::fail(
            3,
            format!("Found {} <main> elements (should be exactly 1)", mains),
            "Use only one <main> element to define the primary content area",
        ));
    }

    if doc.count(r#"[role="main"]"#)? > 0 {
        return Ok(Verdict::pass(
            4,
            "Found role=\"main\" (prefer native <main> element)",
        ));
    }

    Ok(Verdict::fail(
        0,
        "No <main> element found",
        "Wrap your primary content in a <main> element. AI agents use this to identify the core content vs navigation/footer",
    ))
}

fn has_article_section(doc: &Document) -> Result<Verdict, RuleError> {
    let articles = doc.count("article")?;
    let sections = doc.count("section")?;
    let others = doc.count("nav")? + doc.count("header")? + doc.count("footer")?;

    if articles > 0 && sections > 0 {
        return Ok(Verdict::pass(
            5,
            format!(
                "Rich semantic structure: {} <article>, {} <section>, and {} other semantic elements",
                articles, sections, others
            ),
        ));
    }

    if articles > 0 || sections > 0 {
        return Ok(Verdict::pass(
            4,
            format!(
                "Semantic sectioning found: {} <article>, {} <section>",
                articles, sections
            ),
        ));
    }

    if others > 0 {
        return Ok(Verdict::fail(
            2,
            "Has some semantic elements but missing <article> or <section>",
            "Use <article> for self-contained content and <section> for thematic groupings",
        ));
    }

    Ok(Verdict::fail(
        0,
        "No semantic sectioning elements found (using only <div>)",
        "Replace generic <div> containers with <article>, <section>, <nav>, <header>, <footer>. AI agents use semantic HTML to understand page structure",
    ))
}

/// Truncates to `max` characters, appending an ellipsis when anything was cut
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
