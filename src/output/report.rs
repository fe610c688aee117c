//! Terminal report rendering
//!
//! The report has four blocks:
//! - Score header (total, grade, pass/fail counts)
//! - Per-category breakdown with score bars
//! - Passed checks
//! - Failed checks with their suggestions

use crate::output::traits::{OutputResult, ReportRenderer};
use crate::types::AuditResult;
use std::fmt::Write;

const RULE: &str = "  ─────────────────────────────────────────────";
const BAR_WIDTH: u32 = 20;
const NAME_WIDTH: usize = 22;
const SCORE_WIDTH: usize = 7;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const ORANGE: &str = "\x1b[38;5;208m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Human-readable report for an interactive terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReport {
    /// Emit ANSI color codes
    pub color: bool,
}

impl TerminalReport {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// `[filled][empty]` bar proportional to `score / max`
    pub fn score_bar(&self, score: u32, max: u32) -> String {
        let filled = if max == 0 {
            0
        } else {
            ((score * BAR_WIDTH * 2 + max) / (max * 2)).min(BAR_WIDTH)
        };
        let pct = crate::scoring::percentage(score, max);
        let bar = "█".repeat(filled as usize);
        format!(
            "{}{}",
            self.paint(band_color(pct), &bar),
            "░".repeat((BAR_WIDTH - filled) as usize)
        )
    }
}

impl ReportRenderer for TerminalReport {
    fn render(&self, audit: &AuditResult) -> OutputResult<String> {
        let mut out = String::new();
        let color = band_color(audit.percentage);

        // Score header
        writeln!(out)?;
        writeln!(out, "{}", self.paint(DIM, RULE))?;
        writeln!(out)?;
        writeln!(
            out,
            "  CIPWE Score    {}/{}  ({}%)",
            self.paint(color, &audit.total_score.to_string()),
            audit.max_score,
            audit.percentage
        )?;
        writeln!(
            out,
            "  Grade          {} {}",
            audit.grade_emoji,
            self.paint(color, &audit.grade)
        )?;
        writeln!(
            out,
            "  Checks         {}  {}",
            self.paint(GREEN, &format!("{} passed", audit.passed_count)),
            self.paint(
                if audit.failed_count > 0 { RED } else { GREEN },
                &format!("{} failed", audit.failed_count)
            )
        )?;
        writeln!(out)?;
        writeln!(out, "{}", self.paint(DIM, RULE))?;

        // Category breakdown
        writeln!(out)?;
        writeln!(out, "  Category Scores")?;
        writeln!(out)?;
        for cat in &audit.categories {
            let icon = if cat.percentage >= 80 {
                self.paint(GREEN, "✔")
            } else if cat.percentage >= 50 {
                self.paint(YELLOW, "◐")
            } else {
                self.paint(RED, "✘")
            };
            writeln!(
                out,
                "  {} {:<name_w$} {} {:>score_w$} {}%",
                icon,
                cat.category_name,
                self.score_bar(cat.score, cat.max_score),
                format!("{}/{}", cat.score, cat.max_score),
                cat.percentage,
                name_w = NAME_WIDTH,
                score_w = SCORE_WIDTH,
            )?;
        }

        if audit.passed_count > 0 {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(DIM, RULE))?;
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                self.paint(GREEN, &format!("  ✔ Passed ({})", audit.passed_count))
            )?;
            writeln!(out)?;
            for rule in audit.passed() {
                writeln!(
                    out,
                    "    {} {}: {}",
                    self.paint(GREEN, "✔"),
                    rule.rule_name,
                    rule.message
                )?;
            }
        }

        if audit.failed_count > 0 {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(DIM, RULE))?;
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                self.paint(RED, &format!("  ✘ Issues ({})", audit.failed_count))
            )?;
            writeln!(out)?;
            for rule in audit.failed() {
                writeln!(
                    out,
                    "    {} {}: {}",
                    self.paint(RED, "✘"),
                    self.paint(BOLD, &rule.rule_name),
                    rule.message
                )?;
                if let Some(suggestion) = &rule.suggestion {
                    writeln!(out, "      → {}", self.paint(YELLOW, suggestion))?;
                }
            }
        }

        // Footer
        writeln!(out)?;
        writeln!(out, "{}", self.paint(DIM, RULE))?;
        writeln!(out)?;
        if audit.failed_count == 0 {
            writeln!(out, "  🎉 Your site is AI-ready! CIPWE Certified.")?;
        }
        writeln!(out, "{}", self.paint(DIM, &format!("  Report: {}", audit.timestamp)))?;

        Ok(out)
    }
}

/// One-line summary: `<emoji> CIPWE <score>/<max> (<grade>)`
pub fn score_line(audit: &AuditResult) -> String {
    format!(
        "{} CIPWE {}/{} ({})",
        audit.grade_emoji, audit.total_score, audit.max_score, audit.grade
    )
}

fn band_color(percentage: u32) -> &'static str {
    if percentage >= 80 {
        GREEN
    } else if percentage >= 60 {
        YELLOW
    } else if percentage >= 40 {
        ORANGE
    } else {
        RED
    }
}
