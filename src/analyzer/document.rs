//! Parsed HTML document shared by all document rules
//!
//! The HTML and its JSON-LD blocks are parsed once per evaluation; rules only
//! query the result.

use crate::analyzer::RuleError;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Elements whose text is never visible content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// One `<script type="application/ld+json">` block
#[derive(Debug, Clone)]
pub struct JsonLd {
    /// Raw script body
    pub raw: String,
    /// Parsed value, `None` when the body is empty or not valid JSON
    pub value: Option<Value>,
}

/// A parsed HTML page
pub struct Document {
    html: Html,
    json_ld: Vec<JsonLd>,
}

impl Document {
    /// Parses an HTML document and its JSON-LD blocks
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let json_ld = extract_json_ld(&html);
        Self { html, json_ld }
    }

    /// Returns every element matching a CSS selector, in document order
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, RuleError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Counts the elements matching a CSS selector
    pub fn count(&self, selector: &str) -> Result<usize, RuleError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).count())
    }

    /// Returns the trimmed value of an attribute on the first matching element
    ///
    /// Missing elements, missing attributes and blank values all yield `None`.
    pub fn attr(&self, selector: &str, attr: &str) -> Result<Option<String>, RuleError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string))
    }

    /// Returns the trimmed text of all matching elements, concatenated
    pub fn text_of(&self, selector: &str) -> Result<String, RuleError> {
        let selector = parse_selector(selector)?;
        let text: String = self.html.select(&selector).map(visible_text).collect();
        Ok(text.trim().to_string())
    }

    /// Returns the visible text of the whole document
    pub fn text(&self) -> String {
        visible_text(self.html.root_element())
    }

    /// Returns the JSON-LD blocks in document order
    pub fn json_ld(&self) -> &[JsonLd] {
        &self.json_ld
    }

    /// Returns every `@type` declared in the parseable JSON-LD blocks
    ///
    /// Types are collected from top-level objects, top-level arrays and
    /// `@graph` members; array-valued `@type`s are flattened.
    pub fn schema_types(&self) -> Vec<String> {
        let mut types = Vec::new();
        for value in self.json_ld.iter().filter_map(|block| block.value.as_ref()) {
            collect_types(value, &mut types);
        }
        types
    }
}

/// Concatenated text of an element, skipping script, style and template content
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

/// Returns true if any ancestor of the element has the given tag name
pub fn has_ancestor(element: ElementRef<'_>, tag: &str) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == tag)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !NON_CONTENT_ELEMENTS.contains(&child.value().name()) {
                collect_text(child, out);
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, RuleError> {
    Selector::parse(selector).map_err(|e| RuleError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

fn extract_json_ld(html: &Html) -> Vec<JsonLd> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    html.select(&selector)
        .map(|script| {
            let raw: String = script.text().collect();
            let value = if raw.trim().is_empty() {
                None
            } else {
                serde_json::from_str(&raw).ok()
            };
            JsonLd { raw, value }
        })
        .collect()
}

fn collect_types(value: &Value, types: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        Value::Object(map) => {
            match map.get("@type") {
                Some(Value::String(t)) => types.push(t.clone()),
                Some(Value::Array(ts)) => {
                    types.extend(ts.iter().filter_map(Value::as_str).map(str::to_string))
                }
                _ => {}
            }
            if let Some(Value::Array(graph)) = map.get("@graph") {
                for node in graph {
                    collect_types(node, types);
                }
            }
        }
        _ => {}
    }
}
