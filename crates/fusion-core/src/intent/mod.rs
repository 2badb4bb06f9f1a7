//! Query intent taxonomy.
//!
//! Every query resolves to exactly one of four intents. The intent selects a
//! fixed channel weight profile from [`WeightProfiles`].

pub mod weights;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use weights::{IntentWeights, WeightProfiles};

/// The classified purpose of a query.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Point lookups: definitions, who/what/when/where.
    Factual,
    /// Exact-term queries: quoted phrases, acronyms, identifiers.
    Keyword,
    /// Open-ended how/why/compare questions. Also the fallback intent.
    #[default]
    Exploratory,
    /// Corpus- or topic-level overviews.
    Summary,
}

impl Intent {
    pub const COUNT: usize = 4;

    pub const ALL: [Intent; Self::COUNT] = [
        Intent::Factual,
        Intent::Keyword,
        Intent::Exploratory,
        Intent::Summary,
    ];

    /// Lowercase canonical name, as used in config keys and LLM prompts.
    pub fn name(self) -> &'static str {
        match self {
            Intent::Factual => "factual",
            Intent::Keyword => "keyword",
            Intent::Exploratory => "exploratory",
            Intent::Summary => "summary",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.name() == lowered)
            .ok_or_else(|| format!("unknown intent: {s}"))
    }
}
