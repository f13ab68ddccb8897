//! Query Resolver
//!
//! Runs one query per category against a pinned [`Generation`] and groups the
//! hits by the text they were indexed with (the headword).
//!
//! A category with no direct hits is retried exactly once with the query
//! re-read through the locale's keyboard layout (see [`translit::from_latin`]).
//! The first search error aborts the whole resolution.

use super::index::SearchQuery;
use super::query::{QueryLimits, QueryMode, build_query, validate_text};
use super::translit;
use crate::catalog::keys::vault_key_for_doc;
use crate::catalog::types::{Category, Locale};
use crate::error::Result;
use crate::storage::registry::{Generation, Partition};
use std::collections::BTreeMap;

/// Headword -> vault keys of its hits, deduplicated, in hit order.
pub type HeadwordHits = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryResolution {
    pub hits: HeadwordHits,
    /// The hits came from the transliterated retry.
    pub transliterated: bool,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    /// Trimmed query text.
    pub text: String,
    /// The query text re-read in the locale's native layout.
    pub fallback_text: String,
    pub categories: BTreeMap<Category, CategoryResolution>,
}

pub struct QueryResolver<'a> {
    generation: &'a Generation,
    limits: QueryLimits,
    max_hits: usize,
}

impl<'a> QueryResolver<'a> {
    pub fn new(generation: &'a Generation, limits: QueryLimits, max_hits: usize) -> Self {
        Self {
            generation,
            limits,
            max_hits,
        }
    }

    pub fn resolve(&self, text: &str, locale: Locale, mode: QueryMode) -> Result<Resolution> {
        let text = validate_text(text, mode, &self.limits)?;
        let fallback_text = translit::from_latin(&text, locale);

        let direct = build_query(&text, mode);
        let fallback = build_query(&fallback_text, mode);

        let mut categories = BTreeMap::new();
        for category in Category::ALL {
            let partition = self.generation.get(category, locale)?;
            let resolved = self.resolve_category(partition, category, &direct, &fallback)?;
            if resolved.transliterated {
                tracing::debug!(
                    "{}-{}: no direct hits for {:?}, used layout fallback {:?}",
                    category,
                    locale,
                    text,
                    fallback_text
                );
            }
            categories.insert(category, resolved);
        }

        Ok(Resolution {
            text,
            fallback_text,
            categories,
        })
    }

    fn resolve_category(
        &self,
        partition: &Partition,
        category: Category,
        direct: &SearchQuery,
        fallback: &SearchQuery,
    ) -> Result<CategoryResolution> {
        let hits = self.search(partition, category, direct)?;
        if !hits.is_empty() {
            return Ok(CategoryResolution {
                hits,
                transliterated: false,
            });
        }

        Ok(CategoryResolution {
            hits: self.search(partition, category, fallback)?,
            transliterated: true,
        })
    }

    fn search(
        &self,
        partition: &Partition,
        category: Category,
        query: &SearchQuery,
    ) -> Result<HeadwordHits> {
        let mut out = HeadwordHits::new();

        for hit in partition.index.search(query, self.max_hits)? {
            let key = vault_key_for_doc(category, &hit.doc_id);
            let keys = out.entry(hit.text).or_default();
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }

        Ok(out)
    }
}
