//! Rule-based intent classification.
//!
//! Deterministic and always available. Rules are checked in a fixed order and
//! the first match wins:
//!
//! 1. FACTUAL: `what`, `who`, `when`, `where`, `definition`
//! 2. EXPLORATORY: `how`, `why`, `explain`, `compare`, `relationship(s)`
//! 3. KEYWORD: quoted terms, short all-caps acronyms, snake_case identifiers
//! 4. SUMMARY: `summarize`, `overview`, `main points`, `tl;dr`, `brief`
//!
//! No match falls back to EXPLORATORY at low confidence.

use std::sync::LazyLock;

use regex::Regex;

use fusion_core::Intent;

static FACTUAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(what|who|when|where|definition)\b").unwrap());

static EXPLORATORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(how|why|explain|compare|relationships?)\b").unwrap());

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]+"|(?:^|\s)'[^']+'(?:\s|$|[[:punct:]])"#).unwrap());

/// 2–6 character all-caps tokens. Checked against the original-case query.
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Z0-9]{1,5}\b").unwrap());

static SNAKE_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z][A-Za-z0-9]*(?:_[A-Za-z0-9]+)+\b").unwrap());

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(summarize|overview|main\s+points|brief)\b|\btl;\s?dr\b").unwrap()
});

pub const FACTUAL_CONFIDENCE: f64 = 0.8;
pub const EXPLORATORY_CONFIDENCE: f64 = 0.75;
pub const KEYWORD_CONFIDENCE: f64 = 0.7;
pub const SUMMARY_CONFIDENCE: f64 = 0.8;
pub const FALLBACK_CONFIDENCE: f64 = 0.4;

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Factual,
    Exploratory,
    Keyword,
    Summary,
    Fallback,
}

/// Outcome of the rule engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch {
    pub intent: Intent,
    pub confidence: f64,
    pub rule: RuleKind,
}

impl RuleMatch {
    const fn new(intent: Intent, confidence: f64, rule: RuleKind) -> Self {
        Self {
            intent,
            confidence,
            rule,
        }
    }
}

/// Classify a non-empty query with the ordered rule set.
pub fn classify(query: &str) -> RuleMatch {
    if FACTUAL_RE.is_match(query) {
        return RuleMatch::new(Intent::Factual, FACTUAL_CONFIDENCE, RuleKind::Factual);
    }
    if EXPLORATORY_RE.is_match(query) {
        return RuleMatch::new(
            Intent::Exploratory,
            EXPLORATORY_CONFIDENCE,
            RuleKind::Exploratory,
        );
    }
    if has_keyword_markers(query) {
        return RuleMatch::new(Intent::Keyword, KEYWORD_CONFIDENCE, RuleKind::Keyword);
    }
    if SUMMARY_RE.is_match(query) {
        return RuleMatch::new(Intent::Summary, SUMMARY_CONFIDENCE, RuleKind::Summary);
    }
    RuleMatch::new(Intent::Exploratory, FALLBACK_CONFIDENCE, RuleKind::Fallback)
}

fn has_keyword_markers(query: &str) -> bool {
    if QUOTED_RE.is_match(query) || SNAKE_CASE_RE.is_match(query) {
        return true;
    }
    // A query typed entirely in capitals carries no acronym signal.
    let has_lowercase = query.chars().any(char::is_lowercase);
    has_lowercase && ACRONYM_RE.is_match(query)
}
