//! Tolerant parsing of LLM classification responses.
//!
//! Strategies run in order and the first that yields an intent wins:
//! exact name → labeled (`intent: x`) → first intent keyword → default.
//! The parser never fails; [`ParsedIntent::Default`] means nothing usable
//! was found.

use std::sync::LazyLock;

use regex::Regex;

use fusion_core::Intent;

static LABELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bintent\b\s*[:=]\s*["'`*]*\s*(factual|keyword|exploratory|summary)\b"#)
        .unwrap()
});

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(factual|keyword|exploratory|summary)\b").unwrap());

pub const EXACT_CONFIDENCE: f64 = 0.9;
pub const LABELED_CONFIDENCE: f64 = 0.85;
pub const KEYWORD_CONFIDENCE: f64 = 0.6;

/// Result of parsing, tagged with the strategy that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedIntent {
    Exact(Intent),
    Labeled(Intent),
    Keyword(Intent),
    Default,
}

impl ParsedIntent {
    /// The parsed intent, or EXPLORATORY when nothing matched.
    pub fn intent(self) -> Intent {
        match self {
            ParsedIntent::Exact(i) | ParsedIntent::Labeled(i) | ParsedIntent::Keyword(i) => i,
            ParsedIntent::Default => Intent::default(),
        }
    }

    pub fn confidence(self) -> f64 {
        match self {
            ParsedIntent::Exact(_) => EXACT_CONFIDENCE,
            ParsedIntent::Labeled(_) => LABELED_CONFIDENCE,
            ParsedIntent::Keyword(_) => KEYWORD_CONFIDENCE,
            ParsedIntent::Default => 0.0,
        }
    }

    pub fn is_default(self) -> bool {
        self == ParsedIntent::Default
    }
}

type Strategy = fn(&str) -> Option<ParsedIntent>;

const STRATEGIES: [Strategy; 3] = [parse_exact, parse_labeled, parse_keyword];

/// Run the strategy chain over a raw LLM response.
pub fn parse_response(response: &str) -> ParsedIntent {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(response))
        .unwrap_or(ParsedIntent::Default)
}

fn parse_exact(response: &str) -> Option<ParsedIntent> {
    let trimmed = response
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '*'));
    trimmed.parse::<Intent>().ok().map(ParsedIntent::Exact)
}

fn parse_labeled(response: &str) -> Option<ParsedIntent> {
    LABELED_RE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<Intent>().ok())
        .map(ParsedIntent::Labeled)
}

fn parse_keyword(response: &str) -> Option<ParsedIntent> {
    KEYWORD_RE
        .find(response)
        .and_then(|m| m.as_str().parse::<Intent>().ok())
        .map(ParsedIntent::Keyword)
}
