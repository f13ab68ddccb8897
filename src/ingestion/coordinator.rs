//! Ingestion Coordinator
//!
//! Builds a complete partition for every `(category, locale)` pair from one
//! upload and hands them to the registry in a single install. A row fans out
//! to both locale partitions of its category (or only to its own locale when
//! row-locale splitting is on). Rows with an empty name for a locale are not
//! indexed in that locale.
//!
//! Any failure while building leaves the registry untouched.

use super::types::SuggestionRow;
use crate::catalog::keys::{KeyPolicy, composite_keys};
use crate::catalog::types::{Locale, PartitionKey, Record};
use crate::error::Result;
use crate::search::index::TantivyIndexBuilder;
use crate::storage::registry::{IndexRegistry, Partition, Vault};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub key_policy: KeyPolicy,
    /// Index each row only under the locale its row tag names. Untagged rows
    /// still go to both locales.
    pub split_by_row_locale: bool,
}

struct PartitionBuilder {
    index: TantivyIndexBuilder,
    vault: Vault,
}

impl PartitionBuilder {
    fn new() -> Result<Self> {
        Ok(Self {
            index: TantivyIndexBuilder::new()?,
            vault: Vault::new(),
        })
    }

    fn add(&mut self, record: Record, policy: KeyPolicy) -> Result<()> {
        let keys = composite_keys(&record, policy);
        self.index.index(&keys.doc_key, &record.name)?;
        self.vault.insert(keys.vault_key, record);
        Ok(())
    }

    fn finish(self) -> Result<Partition> {
        Ok(Partition::new(Box::new(self.index.build()?), self.vault))
    }
}

fn target_locales(row: &SuggestionRow, options: &IngestOptions) -> Vec<Locale> {
    match (options.split_by_row_locale, row.locale) {
        (true, Some(locale)) => vec![locale],
        _ => Locale::ALL.to_vec(),
    }
}

/// Builds all ten partitions from `rows`. Partitions no row reaches are
/// built empty.
pub fn build_generation(
    rows: &[SuggestionRow],
    options: &IngestOptions,
) -> Result<HashMap<PartitionKey, Partition>> {
    let mut builders = HashMap::new();
    for key in PartitionKey::all() {
        builders.insert(key, PartitionBuilder::new()?);
    }

    for row in rows {
        for locale in target_locales(row, options) {
            if row.name(locale).is_empty() {
                continue;
            }
            let key = PartitionKey::new(row.category, locale);
            if let Some(builder) = builders.get_mut(&key) {
                builder.add(row.record(locale), options.key_policy)?;
            }
        }
    }

    builders
        .into_iter()
        .map(|(key, builder)| Ok((key, builder.finish()?)))
        .collect()
}

/// Rebuilds and installs every partition from `rows`. Returns the number of
/// rows ingested.
pub fn ingest(registry: &IndexRegistry, rows: &[SuggestionRow], options: &IngestOptions) -> Result<usize> {
    let partitions = build_generation(rows, options)?;

    for (key, partition) in &partitions {
        tracing::debug!(
            "Built partition {}: {} documents, {} records",
            key,
            partition.index.doc_count(),
            partition.vault.len()
        );
    }

    registry.install_generation(partitions);
    tracing::info!("Ingested {} rows", rows.len());

    Ok(rows.len())
}
