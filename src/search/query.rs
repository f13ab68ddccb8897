//! Query text validation and normalization.

use super::index::SearchQuery;
use crate::error::{Result, SuggestError};
use regex::Regex;
use std::sync::LazyLock;

/// Anything the index tokenizer would split on. Digits stay, so `A10` and
/// `B12` reach the index as the same single tokens they were indexed as.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]").expect("valid separator pattern"));

/// Text shorter than or equal to this many visible characters is rejected.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Exact contiguous phrase, used for entity name lookup.
    Phrase,
    /// Every whitespace-separated token as a substring, used for autocomplete.
    Conjunctive,
}

/// Upper length bounds per mode, in visible characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_chars: usize,
    pub phrase_max_chars: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_chars: 128,
            phrase_max_chars: 1024,
        }
    }
}

impl QueryLimits {
    pub fn max_for(&self, mode: QueryMode) -> usize {
        match mode {
            QueryMode::Phrase => self.phrase_max_chars,
            QueryMode::Conjunctive => self.max_chars,
        }
    }
}

/// Trims `text` and checks its visible length against the mode's bounds.
pub fn validate_text(text: &str, mode: QueryMode, limits: &QueryLimits) -> Result<String> {
    let trimmed = text.trim();
    let n = trimmed.chars().filter(|c| !c.is_control()).count();

    if n <= MIN_QUERY_CHARS {
        return Err(SuggestError::invalid(format!("too few characters: {}", n)));
    }
    let max = limits.max_for(mode);
    if n > max {
        return Err(SuggestError::invalid(format!("too many characters: {} (max {})", n, max)));
    }

    Ok(trimmed.to_string())
}

/// Replaces every character that is neither a letter nor a digit with a space.
pub fn normalize(text: &str) -> String {
    SEPARATOR.replace_all(text, " ").into_owned()
}

pub fn build_query(text: &str, mode: QueryMode) -> SearchQuery {
    let normalized = normalize(text);
    match mode {
        QueryMode::Phrase => SearchQuery::Phrase(normalized.trim().to_string()),
        QueryMode::Conjunctive => SearchQuery::Conjunction(
            normalized
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
    }
}
