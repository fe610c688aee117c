//! Content clarity rules (10 points)

use crate::analyzer::{has_ancestor, visible_text, Check, Document, Rule, RuleError, Verdict};
use crate::types::Category;
use regex::Regex;

/// Lowercase openers that mark a heading as a question
const QUESTION_OPENERS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "can", "is", "does",
];

pub const CONTENT_LENGTH: Rule = Rule {
    id: "content-length",
    name: "Content Length",
    description: "Check if the page has sufficient text content for AI comprehension",
    category: Category::ContentClarity,
    weight: 3,
    check: Check::Document(content_length),
};

pub const HAS_LISTS_TABLES: Rule = Rule {
    id: "has-lists-tables",
    name: "Lists & Tables",
    description: "Check if the page uses structured content elements (lists, tables)",
    category: Category::ContentClarity,
    weight: 3,
    check: Check::Document(has_lists_tables),
};

pub const HAS_QA_STRUCTURE: Rule = Rule {
    id: "has-qa-structure",
    name: "Q&A Structure",
    description: "Check if the page has question-and-answer formatted content",
    category: Category::ContentClarity,
    weight: 4,
    check: Check::Document(has_qa_structure),
};

fn content_length(doc: &Document) -> Result<Verdict, RuleError> {
    let text = if doc.count("main")? > 0 {
        doc.text_of("main")?
    } else {
        doc.text_of("body")?
    };
    let words = text.split_whitespace().count();

    if words >= 300 {
        return Ok(Verdict::pass(3, format!("Good content density ({} words)", words)));
    }

    if words >= 100 {
        return Ok(Verdict::pass(2, format!("Moderate content ({} words)", words))
            .with_suggestion(
                "Consider adding more descriptive content (300+ words) for better AI comprehension",
            ));
    }

    if words >= 30 {
        return Ok(Verdict::fail(
            1,
            format!("Thin content ({} words)", words),
            "Add more substantive text content. AI agents need sufficient text to understand and summarize your page",
        ));
    }

    Ok(Verdict::fail(
        0,
        format!("Very thin content ({} words)", words),
        "Your page has almost no readable text content. AI agents cannot understand or answer questions about pages without text",
    ))
}

fn has_lists_tables(doc: &Document) -> Result<Verdict, RuleError> {
    let unordered = doc
        .select("ul")?
        .into_iter()
        .filter(|ul| !has_ancestor(*ul, "nav"))
        .count();
    let counts = [
        (unordered, "unordered list(s)"),
        (doc.count("ol")?, "ordered list(s)"),
        (doc.count("dl")?, "definition list(s)"),
        (doc.count("table")?, "table(s)"),
        (doc.count("details")?, "details/summary"),
    ];
    let total: usize = counts.iter().map(|(n, _)| n).sum();

    if total >= 3 {
        let parts: Vec<String> = counts
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, label)| format!("{} {}", n, label))
            .collect();
        return Ok(Verdict::pass(
            3,
            format!("Good structured content: {}", parts.join(", ")),
        ));
    }

    if total >= 1 {
        return Ok(
            Verdict::pass(2, format!("Some structured content found ({} elements)", total))
                .with_suggestion(
                    "Add more lists, tables, or definition lists to make content more parseable by AI agents",
                ),
        );
    }

    Ok(Verdict::fail(
        0,
        "No structured content elements (lists, tables) found",
        "Use <ul>, <ol>, <dl>, <table>, or <details> to structure information. AI agents extract structured content more accurately than paragraphs",
    ))
}

fn has_qa_structure(doc: &Document) -> Result<Verdict, RuleError> {
    let qa_marker = Regex::new(r"(?i)\b[QA]:\s")?;
    let text = doc.text_of("body")?;
    let mut signals = 0;

    if doc.count("details")? > 0 {
        signals += 2;
    }

    if doc.count("dt")? > 0 && doc.count("dd")? > 0 {
        signals += 2;
    }

    let question_headings = doc
        .select("h2, h3, h4")?
        .into_iter()
        .filter(|h| is_question(visible_text(*h).trim()))
        .count();
    signals += match question_headings {
        0 => 0,
        1 => 1,
        _ => 2,
    };

    let lower = text.to_lowercase();
    if lower.contains("frequently asked") || lower.contains("faq") {
        signals += 1;
    }

    if qa_marker.is_match(&text) {
        signals += 1;
    }

    if signals >= 3 {
        return Ok(Verdict::pass(
            4,
            "Strong Q&A structure detected - AI tools can easily extract answers",
        ));
    }

    if signals >= 1 {
        return Ok(Verdict::pass(2, "Some Q&A signals detected").with_suggestion(
            "Strengthen Q&A structure: use question-format headings (H2/H3 ending with \"?\") followed by clear answers",
        ));
    }

    Ok(Verdict::fail(
        0,
        "No Q&A structure detected",
        "Add FAQ-style content with question headings. AI tools like Perplexity & ChatGPT prioritize pages with clear Q&A patterns",
    ))
}

/// Prefix match, so "Island" and "Canada" count as questions too
fn is_question(heading: &str) -> bool {
    let lower = heading.to_lowercase();
    heading.ends_with('?') || QUESTION_OPENERS.iter().any(|w| lower.starts_with(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(inner: &str) -> Document {
        Document::parse(&format!("<html><body>{}</body></html>", inner))
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_content_length_bands() {
        assert_eq!(content_length(&body(&format!("<p>{}</p>", words(300)))).unwrap().score, 3);

        let moderate = content_length(&body(&format!("<p>{}</p>", words(100)))).unwrap();
        assert!(moderate.passed);
        assert_eq!(moderate.score, 2);
        assert!(moderate.suggestion.is_some());

        let thin = content_length(&body(&format!("<p>{}</p>", words(30)))).unwrap();
        assert!(!thin.passed);
        assert_eq!(thin.score, 1);

        let empty = content_length(&body("")).unwrap();
        assert_eq!(empty.score, 0);
        assert_eq!(empty.message, "Very thin content (0 words)");
    }

    #[test]
    fn test_content_length_prefers_main() {
        let doc = body(&format!(
            "<nav>{}</nav><main><p>{}</p></main>",
            words(400),
            words(40)
        ));
        let verdict = content_length(&doc).unwrap();
        assert_eq!(verdict.message, "Thin content (40 words)");
    }

    #[test]
    fn test_content_length_ignores_scripts() {
        let doc = body(&format!("<p>hello</p><script>{}</script>", words(500)));
        assert_eq!(content_length(&doc).unwrap().score, 0);
    }

    #[test]
    fn test_lists_tables_excludes_nav_lists() {
        let doc = body("<nav><ul><li>a</li></ul><ul><li>b</li></ul><ul><li>c</li></ul></nav>");
        let verdict = has_lists_tables(&doc).unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.score, 0);
    }

    #[test]
    fn test_lists_tables_rich() {
        let doc = body("<ul><li>a</li></ul><ol><li>b</li></ol><table><tr><td>c</td></tr></table>");
        let verdict = has_lists_tables(&doc).unwrap();
        assert_eq!(verdict.score, 3);
        assert_eq!(
            verdict.message,
            "Good structured content: 1 unordered list(s), 1 ordered list(s), 1 table(s)"
        );
    }

    #[test]
    fn test_lists_tables_some() {
        let verdict = has_lists_tables(&body("<ol><li>x</li></ol>")).unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.score, 2);
    }

    #[test]
    fn test_qa_strong() {
        let doc = body(
            "<h2>What is it?</h2><p>A thing.</p><h2>How does it work?</h2><details><summary>More</summary>x</details>",
        );
        let verdict = has_qa_structure(&doc).unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.score, 4);
    }

    #[test]
    fn test_qa_weak() {
        let verdict = has_qa_structure(&body("<p>Q: anything</p>")).unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.score, 2);
    }

    #[test]
    fn test_qa_none() {
        let verdict = has_qa_structure(&body("<h2>Overview</h2><p>Plain prose.</p>")).unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.score, 0);
    }

    #[test]
    fn test_is_question() {
        assert!(is_question("Pricing?"));
        assert!(is_question("Why Rust"));
        assert!(is_question("Island hopping"));
        assert!(!is_question("Overview"));
    }
}
