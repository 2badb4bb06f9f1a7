//! Term and entity extraction for the sparse and graph-local channels.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

const STOPWORDS: &[&str] = &[
    "a", "about", "all", "an", "and", "are", "as", "at", "be", "between", "brief", "but", "by",
    "can", "compare", "definition", "describe", "did", "do", "does", "explain", "for", "from",
    "give", "how", "i", "in", "into", "is", "it", "its", "me", "of", "on", "or", "overview",
    "please", "show", "summarize", "tell", "than", "that", "the", "their", "there", "these",
    "this", "to", "vs", "was", "were", "what", "when", "where", "which", "who", "why", "with",
];

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}_\-']*").unwrap());

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, value: String) {
    if seen.insert(value.to_lowercase()) {
        out.push(value);
    }
}

/// Lowercased content terms in query order, stopwords removed, deduplicated.
pub fn terms(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for m in TOKEN_RE.find_iter(text) {
        let token = m.as_str().trim_end_matches('\'').to_lowercase();
        if token.is_empty() || is_stopword(&token) {
            continue;
        }
        push_unique(&mut out, &mut seen, token);
    }
    out
}

/// Entity candidates: quoted phrases, runs of capitalized words, acronyms,
/// and snake_case identifiers. Falls back to [`terms`] when none are found.
pub fn entities(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for caps in QUOTED_RE.captures_iter(text) {
        if let Some(phrase) = caps.get(1) {
            let phrase = phrase.as_str().trim();
            if !phrase.is_empty() {
                push_unique(&mut out, &mut seen, phrase.to_string());
            }
        }
    }

    let unquoted = QUOTED_RE.replace_all(text, " ");
    let mut run: Vec<&str> = Vec::new();
    for m in TOKEN_RE.find_iter(&unquoted) {
        let token = m.as_str().trim_end_matches('\'');
        let capitalized = token.chars().next().is_some_and(char::is_uppercase)
            && !is_stopword(&token.to_lowercase());
        if capitalized {
            run.push(token);
            continue;
        }
        flush_run(&mut run, &mut out, &mut seen);
        if token.contains('_') {
            push_unique(&mut out, &mut seen, token.to_string());
        }
    }
    flush_run(&mut run, &mut out, &mut seen);

    if out.is_empty() {
        terms(text)
    } else {
        out
    }
}

fn flush_run(run: &mut Vec<&str>, out: &mut Vec<String>, seen: &mut HashSet<String>) {
    if !run.is_empty() {
        push_unique(out, seen, run.join(" "));
        run.clear();
    }
}
