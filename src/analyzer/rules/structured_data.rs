//! Structured data rules (30 points)

use crate::analyzer::{Check, Document, Rule, RuleError, Verdict};
use crate::types::Category;

/// Schema.org types accepted as "recognized"
const VALID_SCHEMA_TYPES: &[&str] = &[
    "WebSite",
    "WebPage",
    "Article",
    "BlogPosting",
    "NewsArticle",
    "Product",
    "Organization",
    "Person",
    "LocalBusiness",
    "FAQPage",
    "HowTo",
    "Recipe",
    "Event",
    "Course",
    "SoftwareApplication",
    "MobileApplication",
    "VideoObject",
    "ImageObject",
    "BreadcrumbList",
    "ItemList",
    "Service",
    "Offer",
    "Review",
    "AggregateRating",
    "CreativeWork",
    "TechArticle",
    "APIReference",
    "Book",
];

/// Types that describe the primary content of a page
const RICH_SCHEMA_TYPES: &[&str] = &[
    "Article",
    "BlogPosting",
    "NewsArticle",
    "TechArticle",
    "Product",
    "SoftwareApplication",
    "MobileApplication",
    "WebSite",
    "Organization",
    "LocalBusiness",
    "Course",
    "Event",
    "Recipe",
    "HowTo",
    "VideoObject",
    "Service",
    "Book",
    "CreativeWork",
];

pub const JSONLD_PRESENCE: Rule = Rule {
    id: "jsonld-presence",
    name: "JSON-LD Presence",
    description: "Check if the page contains JSON-LD structured data",
    category: Category::StructuredData,
    weight: 10,
    check: Check::Document(jsonld_presence),
};

pub const JSONLD_VALID_TYPE: Rule = Rule {
    id: "jsonld-valid-type",
    name: "JSON-LD Valid Type",
    description: "Check if JSON-LD uses a recognized Schema.org type",
    category: Category::StructuredData,
    weight: 8,
    check: Check::Document(jsonld_valid_type),
};

pub const FAQ_SCHEMA: Rule = Rule {
    id: "faq-schema",
    name: "FAQ Schema",
    description: "Check if FAQPage schema exists for Q&A content",
    category: Category::StructuredData,
    weight: 6,
    check: Check::Document(faq_schema),
};

pub const ARTICLE_PRODUCT_SCHEMA: Rule = Rule {
    id: "article-product-schema",
    name: "Article/Product Schema",
    description: "Check for rich content schemas (Article, Product, Organization, etc.)",
    category: Category::StructuredData,
    weight: 6,
    check: Check::Document(article_product_schema),
};

fn jsonld_presence(doc: &Document) -> Result<Verdict, RuleError> {
    let blocks = doc.json_ld();
    if blocks.is_empty() {
        return Ok(Verdict::fail(
            0,
            "No JSON-LD structured data found",
            "Add <script type=\"application/ld+json\"> with Schema.org structured data to help AI agents understand your content",
        ));
    }

    let valid = blocks.iter().filter(|b| b.value.is_some()).count();
    if valid > 0 {
        return Ok(Verdict::pass(10, format!("Found {} valid JSON-LD block(s)", valid)));
    }

    Ok(Verdict::fail(
        3,
        "JSON-LD blocks found but contain invalid JSON",
        "Fix the JSON syntax in your <script type=\"application/ld+json\"> blocks",
    ))
}

fn jsonld_valid_type(doc: &Document) -> Result<Verdict, RuleError> {
    if doc.json_ld().is_empty() {
        return Ok(Verdict::fail(
            0,
            "No JSON-LD found to validate type",
            "Add JSON-LD with a valid @type like WebSite, Article, Product, or Organization",
        ));
    }

    let found = doc.schema_types();
    let valid: Vec<&str> = found
        .iter()
        .map(String::as_str)
        .filter(|t| VALID_SCHEMA_TYPES.contains(t))
        .collect();

    if !valid.is_empty() {
        return Ok(Verdict::pass(
            8,
            format!("Valid Schema.org types found: {}", valid.join(", ")),
        ));
    }

    if !found.is_empty() {
        return Ok(Verdict::fail(
            4,
            format!("JSON-LD types found but not standard: {}", found.join(", ")),
            format!(
                "Use standard Schema.org types like: {}",
                VALID_SCHEMA_TYPES[..8].join(", ")
            ),
        ));
    }

    Ok(Verdict::fail(
        0,
        "No @type found in JSON-LD",
        "Add @type field to your JSON-LD structured data",
    ))
}

fn faq_schema(doc: &Document) -> Result<Verdict, RuleError> {
    if doc.schema_types().iter().any(|t| t == "FAQPage") {
        return Ok(Verdict::pass(
            6,
            "FAQPage schema detected - AI agents can parse Q&A content",
        ));
    }

    let text = doc.text().to_lowercase();
    let has_qa_content = text.contains("frequently asked")
        || text.contains("faq")
        || doc.count("details")? > 0
        || doc.count("dt")? > 2;

    if has_qa_content {
        return Ok(Verdict::fail(
            0,
            "FAQ-like content detected but no FAQPage schema",
            "Wrap your FAQ content in FAQPage JSON-LD schema so AI agents can directly extract Q&A pairs",
        ));
    }

    Ok(Verdict::fail(
        2,
        "No FAQ schema found (may not be applicable)",
        "Consider adding FAQPage schema if your page contains Q&A content",
    ))
}

fn article_product_schema(doc: &Document) -> Result<Verdict, RuleError> {
    let mut rich: Vec<String> = Vec::new();
    for t in doc.schema_types() {
        if RICH_SCHEMA_TYPES.contains(&t.as_str()) && !rich.contains(&t) {
            rich.push(t);
        }
    }

    if !rich.is_empty() {
        return Ok(Verdict::pass(
            6,
            format!("Rich schema types found: {}", rich.join(", ")),
        ));
    }

    Ok(Verdict::fail(
        0,
        "No Article, Product, or Organization schema found",
        "Add structured data for your primary content type (Article for blogs, Product for e-commerce, Organization for businesses)",
    ))
}
