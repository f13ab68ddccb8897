//! Index Registry
//!
//! Maps every `(category, locale)` pair to its [`Partition`]. The whole mapping
//! is an immutable [`Generation`] behind an `ArcSwap`:
//!
//! - **Reads** load the current generation (wait-free) and keep it pinned for as
//!   long as the caller holds the returned `Arc`.
//! - **Installs** publish a copy of the mapping with the new partition(s) by a
//!   single pointer swap. Partitions are always built before they reach the
//!   registry, so a reader sees either the old or the new partition, never a
//!   partially filled one.
//! - A replaced generation is dropped once its last in-flight reader finishes.

use crate::catalog::types::{Category, Locale, PartitionKey, Record};
use crate::error::{Result, SuggestError};
use crate::search::index::SearchIndex;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

/// Records of one partition, keyed by vault key. Read-only once installed.
#[derive(Debug, Default)]
pub struct Vault {
    records: HashMap<String, Record>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `key`; the last record stored for a key wins.
    pub fn insert(&mut self, key: String, record: Record) {
        self.records.insert(key, record);
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Search index + vault for one category-locale pair.
pub struct Partition {
    pub index: Box<dyn SearchIndex>,
    pub vault: Vault,
}

impl Partition {
    pub fn new(index: Box<dyn SearchIndex>, vault: Vault) -> Self {
        Self { index, vault }
    }
}

/// An immutable view of all installed partitions.
#[derive(Clone, Default)]
pub struct Generation {
    partitions: HashMap<PartitionKey, Arc<Partition>>,
}

impl Generation {
    pub fn get(&self, category: Category, locale: Locale) -> Result<&Arc<Partition>> {
        self.partitions
            .get(&PartitionKey::new(category, locale))
            .ok_or(SuggestError::PartitionNotFound { category, locale })
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

pub struct IndexRegistry {
    current: ArcSwap<Generation>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Generation::default()),
        }
    }

    /// Pins the current generation for a multi-partition read.
    pub fn snapshot(&self) -> Arc<Generation> {
        self.current.load_full()
    }

    pub fn get(&self, category: Category, locale: Locale) -> Result<Arc<Partition>> {
        self.current.load().get(category, locale).cloned()
    }

    /// Replaces the partition at `key`; last writer wins.
    pub fn install(&self, key: PartitionKey, partition: Partition) {
        let partition = Arc::new(partition);
        self.current.rcu(|current| {
            let mut next = Generation::clone(current);
            next.partitions.insert(key, partition.clone());
            next
        });
        tracing::debug!("Installed partition {}", key);
    }

    /// Replaces every partition in `partitions` with one swap.
    pub fn install_generation(&self, partitions: HashMap<PartitionKey, Partition>) {
        let partitions: HashMap<PartitionKey, Arc<Partition>> = partitions
            .into_iter()
            .map(|(key, partition)| (key, Arc::new(partition)))
            .collect();
        let count = partitions.len();

        self.current.rcu(|current| {
            let mut next = Generation::clone(current);
            next.partitions
                .extend(partitions.iter().map(|(key, p)| (*key, p.clone())));
            next
        });
        tracing::debug!("Installed {} partitions", count);
    }
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new()
    }
}
