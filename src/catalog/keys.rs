//! Composite keys and headword text helpers.
//!
//! A record is addressed twice: by the document key it is indexed under in the
//! partition's search index, and by the vault key its `Record` is stored under.
//! `Code` records use `ID|code` for both. Other categories are stored under the
//! bare ID; their document key depends on the configured [`KeyPolicy`].

use super::types::{Category, Record};
use crate::error::SuggestError;
use sha2::{Digest, Sha256};
use std::str::FromStr;

pub const KEY_SEPARATOR: char = '|';

/// How non-`Code` documents are keyed in the search index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Document key is the ID. A later name under the same ID replaces the
    /// earlier one in the index.
    Id,
    /// Document key is `ID|digest(name)`, so every distinct name under one ID
    /// stays searchable. The vault still keeps one record per ID.
    #[default]
    IdNameHash,
}

impl FromStr for KeyPolicy {
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(KeyPolicy::Id),
            "id-name-hash" => Ok(KeyPolicy::IdNameHash),
            other => Err(SuggestError::invalid(format!("unknown key policy: {:?}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeKeys {
    pub doc_key: String,
    pub vault_key: String,
}

/// Classification code of a `Code` name: the text before the first separator,
/// with all whitespace removed. `"A10 | Insulin"` -> `"A10"`.
pub fn normalize_code(name: &str) -> String {
    name.split(KEY_SEPARATOR)
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// First 8 hex digits of the SHA-256 of `name`.
pub fn name_digest(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    hex::encode(digest)[..8].to_string()
}

pub fn composite_keys(record: &Record, policy: KeyPolicy) -> CompositeKeys {
    let id = record.id.to_string();

    if record.category == Category::Code {
        let code = record.code.clone().unwrap_or_else(|| normalize_code(&record.name));
        let key = format!("{}{}{}", id, KEY_SEPARATOR, code);
        return CompositeKeys {
            doc_key: key.clone(),
            vault_key: key,
        };
    }

    let doc_key = match policy {
        KeyPolicy::Id => id.clone(),
        KeyPolicy::IdNameHash => format!("{}{}{}", id, KEY_SEPARATOR, name_digest(&record.name)),
    };

    CompositeKeys {
        doc_key,
        vault_key: id,
    }
}

/// Maps a search hit's document key back to the vault key of its record.
///
/// `Code` keys are kept whole because the code is part of the vault key.
pub fn vault_key_for_doc(category: Category, doc_key: &str) -> &str {
    if category == Category::Code {
        return doc_key;
    }
    doc_key.split(KEY_SEPARATOR).next().unwrap_or(doc_key)
}

/// Display form of a headword: separators become spaces, whitespace runs
/// collapse. `"A10 | Insulin"` -> `"A10 Insulin"`.
pub fn display_headword(text: &str) -> String {
    text.replace(KEY_SEPARATOR, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name part of a `Code` headword (text after the first separator), used by
/// the flat suggestion list. Names without a separator are returned trimmed.
pub fn code_name_part(text: &str) -> &str {
    match text.split_once(KEY_SEPARATOR) {
        Some((_, name)) => name.trim(),
        None => text.trim(),
    }
}
