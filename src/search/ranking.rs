//! Ranking Engine
//!
//! Turns resolved hits into ordered suggestion groups:
//!
//! 1. Headwords are ordered by locale collation.
//! 2. Each headword's vault keys are resolved to records; keys with no record
//!    are dropped.
//! 3. Members are ordered by importance (desc), current sale count (desc), then
//!    name (asc). Sale counts are read from the popularity table at this point,
//!    so a popularity refresh reorders results without reindexing.
//!
//! Informational listings skip step 1 grouping: every hit is pooled into one
//! unnamed group, which is always emitted.

use super::collation::Collators;
use super::resolver::{HeadwordHits, Resolution};
use crate::catalog::keys::{code_name_part, display_headword};
use crate::catalog::types::{Category, Locale, Record};
use crate::storage::popularity::PopularityTable;
use crate::storage::registry::Vault;
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionGroup {
    /// Display headword; empty for the pooled informational group.
    pub headword: String,
    /// Record IDs, best first.
    pub members: Vec<i64>,
}

/// A record paired with the sale count it is ranked by.
#[derive(Debug, Clone, Copy)]
struct RankKey<'a> {
    record: &'a Record,
    sale: i64,
}

fn compare(a: &RankKey<'_>, b: &RankKey<'_>) -> Ordering {
    b.record
        .importance
        .cmp(&a.record.importance)
        .then_with(|| b.sale.cmp(&a.sale))
        .then_with(|| a.record.name.cmp(&b.record.name))
        .then_with(|| a.record.id.cmp(&b.record.id))
}

pub struct Ranker<'a> {
    collators: &'a Collators,
    popularity: &'a PopularityTable,
}

impl<'a> Ranker<'a> {
    pub fn new(collators: &'a Collators, popularity: &'a PopularityTable) -> Self {
        Self {
            collators,
            popularity,
        }
    }

    /// Resolves `keys` through `vault` and returns the ranked record IDs.
    pub fn rank_members(&self, vault: &Vault, keys: &[String]) -> Vec<i64> {
        let mut ranked: Vec<RankKey<'_>> = keys
            .iter()
            .filter_map(|key| vault.get(key))
            .map(|record| RankKey {
                record,
                sale: self.popularity.get(record.id),
            })
            .collect();
        ranked.sort_by(|a, b| compare(a, b));

        let mut seen = HashSet::with_capacity(ranked.len());
        ranked
            .into_iter()
            .map(|r| r.record.id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Ordered groups for one category.
    pub fn rank_category(
        &self,
        category: Category,
        locale: Locale,
        hits: &HeadwordHits,
        vault: &Vault,
    ) -> Vec<SuggestionGroup> {
        let mut headwords: Vec<String> = hits.keys().cloned().collect();
        self.collators.sort(locale, &mut headwords);

        if category.is_pooled() {
            return vec![self.rank_pooled(&headwords, hits, vault)];
        }

        headwords
            .iter()
            .filter_map(|headword| {
                let members = self.rank_members(vault, &hits[headword]);
                if members.is_empty() {
                    return None;
                }
                Some(SuggestionGroup {
                    headword: display_headword(headword),
                    members,
                })
            })
            .collect()
    }

    fn rank_pooled(&self, headwords: &[String], hits: &HeadwordHits, vault: &Vault) -> SuggestionGroup {
        let mut seen = HashSet::new();
        let keys: Vec<String> = headwords
            .iter()
            .flat_map(|headword| hits[headword].iter())
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .collect();

        SuggestionGroup {
            headword: String::new(),
            members: self.rank_members(vault, &keys),
        }
    }

    /// Flat list of headwords across all categories.
    ///
    /// `Code` headwords contribute their name part only. Headwords are
    /// upper-cased and deduplicated, collated, and those starting with the
    /// query (as typed or layout-converted) are moved to the front.
    pub fn rank_flat(&self, locale: Locale, resolution: &Resolution) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut all = Vec::new();

        for (category, resolved) in &resolution.categories {
            for headword in resolved.hits.keys() {
                let text = match category {
                    Category::Code => code_name_part(headword),
                    _ => headword.trim(),
                };
                if text.is_empty() {
                    continue;
                }
                let upper = text.to_uppercase();
                if seen.insert(upper.clone()) {
                    all.push(upper);
                }
            }
        }
        self.collators.sort(locale, &mut all);

        let prefixes = [
            resolution.text.to_lowercase(),
            resolution.fallback_text.to_lowercase(),
        ];
        let (mut first, rest): (Vec<String>, Vec<String>) = all.into_iter().partition(|h| {
            let lower = h.to_lowercase();
            prefixes.iter().any(|p| lower.starts_with(p.as_str()))
        });
        first.extend(rest);
        first
    }
}
