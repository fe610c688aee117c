//! Score aggregation
//!
//! Reduces the flat list of rule outcomes into per-category and overall
//! totals. Both are plain sums over the same results, so category scores
//! always add up to the overall score.

mod grade;

pub use grade::{grade_emoji, grade_for, FAILING_GRADE};

use crate::types::{AuditResult, Category, CategoryScore, RuleResult};

/// Aggregates rule outcomes into an [`AuditResult`] stamped with the current time
pub fn aggregate(url: &str, results: Vec<RuleResult>) -> AuditResult {
    aggregate_at(url, results, chrono::Utc::now().to_rfc3339())
}

/// Aggregates rule outcomes with an explicit timestamp
///
/// Everything but the timestamp is a pure function of `url` and `results`.
pub fn aggregate_at(url: &str, results: Vec<RuleResult>, timestamp: String) -> AuditResult {
    let categories: Vec<CategoryScore> = Category::ALL
        .iter()
        .map(|&category| {
            let (score, max_score) = results
                .iter()
                .filter(|r| r.category == category)
                .fold((0, 0), |(s, m), r| (s + r.score, m + r.max_score));
            CategoryScore {
                category,
                category_name: category.display_name().to_string(),
                score,
                max_score,
                percentage: percentage(score, max_score),
            }
        })
        .collect();

    let total_score: u32 = results.iter().map(|r| r.score).sum();
    let max_score: u32 = results.iter().map(|r| r.max_score).sum();
    let pct = percentage(total_score, max_score);
    let grade = grade_for(pct);
    let passed_count = results.iter().filter(|r| r.passed).count();
    let failed_count = results.len() - passed_count;

    tracing::debug!(
        "Aggregated {} results: {}/{} ({}%, {})",
        results.len(),
        total_score,
        max_score,
        pct,
        grade
    );

    AuditResult {
        url: url.to_string(),
        total_score,
        max_score,
        percentage: pct,
        grade: grade.to_string(),
        grade_emoji: grade_emoji(grade).to_string(),
        categories,
        rules: results,
        passed_count,
        failed_count,
        timestamp,
    }
}

/// `round(score * 100 / max)` with halves rounded up, 0 when `max` is 0
pub fn percentage(score: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (score * 200 + max) / (max * 2)
}
