//! LLM-backed listwise reranker.
//!
//! Sends the query and numbered passages, reads back a list of passage
//! numbers. Unmentioned passages keep their relative fused order after the
//! mentioned ones. A response with no usable number is an invalid ordering.

use std::fmt::Write;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use fusion_core::errors::RerankError;
use fusion_core::models::FusedResult;
use fusion_core::traits::{LlmClient, Reranker};

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

const DEFAULT_MAX_PASSAGE_CHARS: usize = 500;

pub struct LlmReranker {
    llm: Arc<dyn LlmClient>,
    max_passage_chars: usize,
}

impl LlmReranker {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            max_passage_chars: DEFAULT_MAX_PASSAGE_CHARS,
        }
    }

    pub fn with_max_passage_chars(mut self, max: usize) -> Self {
        self.max_passage_chars = max;
        self
    }

    fn build_prompt(&self, query: &str, candidates: &[FusedResult]) -> String {
        let mut prompt = String::from(
            "Rank the passages below by relevance to the query.\n\
             Answer with the passage numbers only, most relevant first, comma-separated.\n",
        );
        let _ = writeln!(prompt, "Query: {query}");
        for (i, candidate) in candidates.iter().enumerate() {
            let text = candidate.content.as_deref().unwrap_or(&candidate.item_id);
            let snippet: String = text.chars().take(self.max_passage_chars).collect();
            let _ = writeln!(prompt, "[{}] {}", i + 1, snippet);
        }
        prompt
    }
}

/// Map a response to candidate indices: 1-based numbers, out-of-range and
/// repeated numbers ignored, unmentioned indices appended in order.
pub fn parse_ordering(response: &str, len: usize) -> Result<Vec<usize>, RerankError> {
    let mut order = Vec::with_capacity(len);
    let mut used = vec![false; len];
    for m in NUMBER_RE.find_iter(response) {
        let Ok(n) = m.as_str().parse::<usize>() else {
            continue;
        };
        if n == 0 || n > len || used[n - 1] {
            continue;
        }
        used[n - 1] = true;
        order.push(n - 1);
    }
    if order.is_empty() {
        return Err(RerankError::InvalidOrdering {
            reason: "response contained no passage numbers".to_string(),
        });
    }
    order.extend((0..len).filter(|i| !used[*i]));
    Ok(order)
}

#[async_trait]
impl Reranker for LlmReranker {
    fn name(&self) -> &str {
        "llm"
    }

    async fn rerank(
        &self,
        query: &str,
        candidates: &[FusedResult],
    ) -> Result<Vec<FusedResult>, RerankError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = self.build_prompt(query, candidates);
        let response = self.llm.complete(&prompt).await?;
        let order = parse_ordering(&response, candidates.len())?;

        let len = order.len() as f64;
        Ok(order
            .into_iter()
            .enumerate()
            .map(|(pos, idx)| {
                let mut result = candidates[idx].clone();
                result.rerank_score = Some(1.0 - pos as f64 / len);
                result
            })
            .collect())
    }
}
