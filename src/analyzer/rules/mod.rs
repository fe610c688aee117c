//! The registered rule set
//!
//! Order is significant: results are reported in this order and renderers
//! index into them positionally. Weights add up to 100.

mod agent_signals;
mod content_clarity;
mod crawl_signals;
mod metadata;
mod semantic_html;
mod structured_data;

use crate::analyzer::Rule;

pub use agent_signals::{HAS_LLMS_TXT, HAS_STRUCTURED_SUMMARY};
pub use content_clarity::{CONTENT_LENGTH, HAS_LISTS_TABLES, HAS_QA_STRUCTURE};
pub use crawl_signals::{HAS_CANONICAL, HAS_ROBOTS, HAS_SITEMAP};
pub use metadata::{HAS_META_DESCRIPTION, HAS_OPENGRAPH, HAS_TITLE};
pub use semantic_html::{HAS_ARTICLE_SECTION, HAS_MAIN, HEADING_HIERARCHY, SINGLE_H1};
pub use structured_data::{ARTICLE_PRODUCT_SCHEMA, FAQ_SCHEMA, JSONLD_PRESENCE, JSONLD_VALID_TYPE};

static ALL_RULES: [Rule; 19] = [
    // Structured Data (30)
    JSONLD_PRESENCE,
    JSONLD_VALID_TYPE,
    FAQ_SCHEMA,
    ARTICLE_PRODUCT_SCHEMA,
    // Semantic HTML (20)
    SINGLE_H1,
    HEADING_HIERARCHY,
    HAS_MAIN,
    HAS_ARTICLE_SECTION,
    // Metadata (15)
    HAS_TITLE,
    HAS_META_DESCRIPTION,
    HAS_OPENGRAPH,
    // Crawl Signals (15)
    HAS_ROBOTS,
    HAS_SITEMAP,
    HAS_CANONICAL,
    // Content Clarity (10)
    CONTENT_LENGTH,
    HAS_LISTS_TABLES,
    HAS_QA_STRUCTURE,
    // Agent Signals (10)
    HAS_LLMS_TXT,
    HAS_STRUCTURED_SUMMARY,
];

/// Returns every registered rule in evaluation order
pub fn all_rules() -> &'static [Rule] {
    &ALL_RULES
}

/// Looks up a rule by its stable id
pub fn find_rule(id: &str) -> Option<&'static Rule> {
    ALL_RULES.iter().find(|rule| rule.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::evaluate;
    use crate::types::{Category, CrawlData};
    use std::collections::HashSet;

    fn sample_pages() -> Vec<CrawlData> {
        let rich = r#"<html lang="en"><head>
<title>Example Widgets - Durable widgets for every workshop</title>
<meta name="description" content="Example Widgets builds durable, repairable widgets for home and professional workshops.">
<meta property="og:title" content="Widgets"><meta property="og:description" content="Durable widgets">
<link rel="canonical" href="https://example.com/">
<script type="application/ld+json">{"@context":"https://schema.org","@type":["FAQPage","Organization"]}</script>
<script type="application/ld+json">{ not json</script>
</head><body><main><article><section><h1>Widgets</h1><h2>What is a widget?</h2>
<p>Q: Why? A: Because.</p><ul><li>a</li></ul><table><tr><td>x</td></tr></table>
<details><summary>More</summary>Text</details><dl><dt>a</dt><dd>b</dd></dl>
</section></article></main></body></html>"#;

        let mut full = CrawlData::from_html("https://example.com", rich);
        full.robots_txt = Some("User-agent: GPTBot\nDisallow: /\nSitemap: https://example.com/sitemap.xml".to_string());
        full.sitemap_xml = Some("<urlset><url><loc>x</loc><lastmod>d</lastmod><priority>1</priority></url></urlset>".to_string());
        full.llms_txt = Some("# Site\n> summary\n## Docs\nhttps://example.com".to_string());

        let mut malformed = CrawlData::from_html("x", "<h1>a</h1><h1>b</h1><h4>c</h4><h2>d</h2><h6>e</h6>");
        malformed.robots_txt = Some(String::new());
        malformed.sitemap_xml = Some("not xml".to_string());
        malformed.llms_txt = Some("plain".to_string());

        vec![
            CrawlData::from_html("x", ""),
            CrawlData::from_html("x", "<body><p>no head at all</p></body>"),
            malformed,
            full,
        ]
    }

    #[test]
    fn test_weights_total_100() {
        let total: u32 = all_rules().iter().map(|r| r.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_category_weights_match_documented_max() {
        for category in Category::ALL {
            let total: u32 = all_rules()
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.weight)
                .sum();
            assert_eq!(total, category.documented_max(), "{}", category);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all_rules().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), all_rules().len());
    }

    #[test]
    fn test_rules_grouped_in_category_order() {
        let order: Vec<usize> = all_rules()
            .iter()
            .map(|r| Category::ALL.iter().position(|c| *c == r.category).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_real_rules_score_within_weight() {
        for data in sample_pages() {
            let results = evaluate(&data);
            assert_eq!(results.len(), all_rules().len());

            for (rule, result) in all_rules().iter().zip(&results) {
                assert_eq!(result.rule_id, rule.id);
                assert_eq!(result.max_score, rule.weight, "{}", rule.id);
                assert!(result.score <= result.max_score, "{}: {}", rule.id, result.score);
                assert!(!result.message.starts_with("Rule error"), "{}: {}", rule.id, result.message);
            }
        }
    }

    #[test]
    fn test_find_rule() {
        assert_eq!(find_rule("has-llms-txt").map(|r| r.weight), Some(5));
        assert!(find_rule("no-such-rule").is_none());
    }
}
