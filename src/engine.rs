//! Suggestion Engine
//!
//! The single owner of the service state: the index registry, the popularity
//! table, the collators and the settings. HTTP handlers share one `Arc<Engine>`.
//!
//! Every query loads one registry generation and uses it for both resolution
//! and ranking, so a concurrent ingestion never produces a mixed answer.

use crate::catalog::keys::KeyPolicy;
use crate::catalog::types::Locale;
use crate::error::{Result, SuggestError};
use crate::ingestion::coordinator::{self, IngestOptions};
use crate::ingestion::parse::{parse_popularity_rows, parse_suggestion_rows};
use crate::ingestion::types::{PopularityResponse, SuggestionRow};
use crate::search::collation::Collators;
use crate::search::query::{QueryLimits, QueryMode};
use crate::search::ranking::Ranker;
use crate::search::resolver::QueryResolver;
use crate::search::types::{FlatSuggestions, GroupedSuggestions};
use crate::storage::popularity::PopularityTable;
use crate::storage::registry::IndexRegistry;
use std::collections::BTreeMap;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub limits: QueryLimits,
    /// Cap on hits taken from one partition search.
    pub max_hits: usize,
    pub default_limit: usize,
    pub max_limit: usize,
    pub ingest: IngestOptions,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            limits: QueryLimits::default(),
            max_hits: 1000,
            default_limit: 10,
            max_limit: 1000,
            ingest: IngestOptions {
                key_policy: KeyPolicy::default(),
                split_by_row_locale: false,
            },
        }
    }
}

pub struct Engine {
    registry: IndexRegistry,
    popularity: PopularityTable,
    collators: Collators,
    settings: EngineSettings,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> anyhow::Result<Self> {
        Ok(Self {
            registry: IndexRegistry::new(),
            popularity: PopularityTable::new(),
            collators: Collators::new()?,
            settings,
        })
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn popularity(&self) -> &PopularityTable {
        &self.popularity
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // ============================================================
    // INGESTION
    // ============================================================

    pub fn ingest(&self, rows: &[SuggestionRow]) -> Result<usize> {
        coordinator::ingest(&self.registry, rows, &self.settings.ingest)
    }

    pub fn ingest_csv(&self, body: &[u8]) -> Result<usize> {
        let rows = parse_suggestion_rows(body)?;
        self.ingest(&rows)
    }

    /// Applies a popularity upload. Nothing is written unless every row parses.
    pub fn upload_popularity_csv(&self, body: &[u8]) -> Result<PopularityResponse> {
        let rows = parse_popularity_rows(body)?;
        let applied = self.popularity.upsert_many(rows);
        let total = self.popularity.len();
        tracing::info!("Popularity upload: {} rows, {} ids total", applied, total);

        Ok(PopularityResponse {
            rows: applied,
            total,
        })
    }

    // ============================================================
    // QUERIES
    // ============================================================

    /// Absent means the default limit; values above the maximum are clamped.
    pub fn effective_limit(&self, limit: Option<usize>) -> Result<usize> {
        match limit {
            None => Ok(self.settings.default_limit),
            Some(0) => Err(SuggestError::invalid("limit must be positive")),
            Some(n) => Ok(n.min(self.settings.max_limit)),
        }
    }

    /// Grouped suggestions per category, matching `text` as a phrase.
    pub fn suggest_groups(&self, text: &str, limit: Option<usize>, locale: Locale) -> Result<GroupedSuggestions> {
        let limit = self.effective_limit(limit)?;
        let started = Instant::now();

        let generation = self.registry.snapshot();
        let resolution = QueryResolver::new(&generation, self.settings.limits, self.settings.max_hits)
            .resolve(text, locale, QueryMode::Phrase)?;
        let ranker = Ranker::new(&self.collators, &self.popularity);

        let mut groups = BTreeMap::new();
        for (category, resolved) in &resolution.categories {
            let partition = generation.get(*category, locale)?;
            let mut ranked = ranker.rank_category(*category, locale, &resolved.hits, &partition.vault);
            if category.is_pooled() {
                for group in &mut ranked {
                    group.members.truncate(limit);
                }
            } else {
                ranked.truncate(limit);
            }
            groups.insert(*category, ranked);
        }

        tracing::debug!("suggest {:?} ({}) took {:?}", resolution.text, locale, started.elapsed());

        Ok(GroupedSuggestions {
            text: resolution.text,
            limit,
            groups,
        })
    }

    /// One merged headword list across categories, matching every token of
    /// `text` as a substring.
    pub fn suggest_flat(&self, text: &str, limit: Option<usize>, locale: Locale) -> Result<FlatSuggestions> {
        let limit = self.effective_limit(limit)?;
        let started = Instant::now();

        let generation = self.registry.snapshot();
        let resolution = QueryResolver::new(&generation, self.settings.limits, self.settings.max_hits)
            .resolve(text, locale, QueryMode::Conjunctive)?;

        let mut suggestions = Ranker::new(&self.collators, &self.popularity).rank_flat(locale, &resolution);
        suggestions.truncate(limit);

        tracing::debug!("sugg {:?} ({}) took {:?}", resolution.text, locale, started.elapsed());

        Ok(FlatSuggestions {
            text: resolution.text,
            limit,
            suggestions,
        })
    }
}
