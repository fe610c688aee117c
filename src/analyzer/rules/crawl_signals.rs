//! Crawl signal rules (15 points)

use crate::analyzer::rules::semantic_html::excerpt;
use crate::analyzer::{AuxFile, Check, Document, Rule, RuleError, Verdict};
use crate::types::Category;

/// User-agent tokens of known AI crawlers, lowercase
const AI_BOT_TOKENS: &[&str] = &[
    "gptbot",
    "chatgpt",
    "anthropic",
    "claude",
    "perplexitybot",
    "googleother",
];

pub const HAS_ROBOTS: Rule = Rule {
    id: "has-robots",
    name: "robots.txt",
    description: "Check if robots.txt is accessible and well-formed",
    category: Category::CrawlSignals,
    weight: 5,
    check: Check::AuxFile {
        file: AuxFile::RobotsTxt,
        check: has_robots,
    },
};

pub const HAS_SITEMAP: Rule = Rule {
    id: "has-sitemap",
    name: "sitemap.xml",
    description: "Check if sitemap.xml is accessible",
    category: Category::CrawlSignals,
    weight: 5,
    check: Check::AuxFile {
        file: AuxFile::SitemapXml,
        check: has_sitemap,
    },
};

pub const HAS_CANONICAL: Rule = Rule {
    id: "has-canonical",
    name: "Canonical URL",
    description: "Check if the page has a canonical link tag",
    category: Category::CrawlSignals,
    weight: 5,
    check: Check::Document(has_canonical),
};

fn has_robots(robots: Option<&str>) -> Result<Verdict, RuleError> {
    let Some(content) = robots.filter(|c| !c.is_empty()) else {
        return Ok(Verdict::fail(
            0,
            "No robots.txt found",
            "Create a robots.txt file that explicitly allows AI agent crawling. Include Sitemap directive",
        ));
    };

    let content = content.to_lowercase();
    let has_sitemap = content.contains("sitemap:");
    let has_ai_rules = AI_BOT_TOKENS.iter().any(|bot| content.contains(bot));

    if has_sitemap && has_ai_rules {
        return Ok(Verdict::pass(
            5,
            "robots.txt found with Sitemap directive and AI bot rules",
        ));
    }

    if has_sitemap {
        return Ok(Verdict::pass(4, "robots.txt found with Sitemap directive"));
    }

    // Substring match: `Disallow: /private` trips this too
    if content.contains("disallow: /") {
        return Ok(Verdict::fail(
            1,
            "robots.txt exists but may be blocking crawlers",
            "Review your robots.txt and consider allowing GPTBot, Anthropic-AI, and PerplexityBot",
        ));
    }

    Ok(Verdict::pass(3, "robots.txt found but missing Sitemap directive")
        .with_suggestion("Add \"Sitemap: https://yoursite.com/sitemap.xml\" to robots.txt"))
}

fn has_sitemap(sitemap: Option<&str>) -> Result<Verdict, RuleError> {
    let Some(content) = sitemap.filter(|c| !c.is_empty()) else {
        return Ok(Verdict::fail(
            0,
            "No sitemap.xml found",
            "Generate a sitemap.xml listing all important pages. AI agents use sitemaps to discover and prioritize content",
        ));
    };

    let content = content.to_lowercase();
    let has_root = content.contains("<urlset") || content.contains("<sitemapindex");
    let has_entries = content.contains("<url>") || content.contains("<sitemap>");

    if !(has_root && has_entries) {
        return Ok(Verdict::fail(
            1,
            "sitemap.xml found but appears malformed",
            "Ensure sitemap.xml follows the Sitemaps protocol (sitemaps.org)",
        ));
    }

    let entries = content.matches("<url>").count() + content.matches("<sitemap>").count();

    if content.contains("<lastmod>") && content.contains("<priority>") {
        return Ok(Verdict::pass(
            5,
            format!(
                "Rich sitemap found ({} entries with lastmod and priority)",
                entries
            ),
        ));
    }

    Ok(Verdict::pass(4, format!("Sitemap found ({} entries)", entries))
        .with_suggestion("Add <lastmod> and <priority> tags to help AI agents prioritize content"))
}

fn has_canonical(doc: &Document) -> Result<Verdict, RuleError> {
    let Some(canonical) = doc.attr(r#"link[rel="canonical"]"#, "href")? else {
        return Ok(Verdict::fail(
            0,
            "No canonical URL tag found",
            "Add <link rel=\"canonical\" href=\"...\"> to prevent duplicate content issues and help AI agents identify the authoritative URL",
        ));
    };

    let well_formed = canonical.starts_with("http://")
        || canonical.starts_with("https://")
        || canonical.starts_with('/');

    if well_formed {
        let shown = match canonical.char_indices().nth(80) {
            Some((cut, _)) => &canonical[..cut],
            None => canonical.as_str(),
        };
        return Ok(Verdict::pass(5, format!("Canonical URL set: {}", shown)));
    }

    Ok(Verdict::fail(
        2,
        format!(
            "Canonical URL found but may be malformed: \"{}\"",
            excerpt(&canonical, 80)
        ),
        "Use a full absolute URL for the canonical link",
    ))
}
