//! LLM-backed classification call.

use std::time::Duration;

use fusion_core::errors::ClassificationError;
use fusion_core::traits::LlmClient;
use fusion_core::Intent;

use super::parser::{self, ParsedIntent};

/// Prompt asking for a single intent label.
pub fn build_prompt(query: &str) -> String {
    let labels = Intent::ALL.map(Intent::name).join(", ");
    format!(
        "Classify the search query into exactly one intent.\n\
         Intents:\n\
         - factual: a specific fact, definition, or who/what/when/where lookup\n\
         - keyword: exact terms, quoted phrases, acronyms, or identifiers\n\
         - exploratory: open-ended how/why questions, comparisons, relationships\n\
         - summary: an overview or summary of a topic or the whole corpus\n\
         Respond with one word from: {labels}.\n\
         Query: {query}\n\
         Intent:"
    )
}

/// Ask the LLM for an intent within `timeout`.
///
/// A response that parses to nothing is reported as
/// [`ClassificationError::Unparseable`] so the caller can fall back to rules.
pub async fn classify(
    llm: &dyn LlmClient,
    query: &str,
    timeout: Duration,
) -> Result<ParsedIntent, ClassificationError> {
    let prompt = build_prompt(query);
    let response = match tokio::time::timeout(timeout, llm.complete(&prompt)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            return Err(ClassificationError::Unavailable {
                reason: e.to_string(),
            })
        }
        Err(_) => {
            return Err(ClassificationError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
        }
    };

    let parsed = parser::parse_response(&response);
    if parsed.is_default() {
        return Err(ClassificationError::Unparseable {
            response: truncate(&response, 200),
        });
    }
    Ok(parsed)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
