//! Storage Module Tests
//!
//! ## Test Scopes
//! - **Registry**: Lookup errors, atomic replacement, pinned snapshots.
//! - **Vault**: Keyed record storage.
//! - **Popularity**: Merge-by-key refreshes and concurrent upserts.

#[cfg(test)]
mod tests {
    use crate::catalog::types::{Category, Locale, PartitionKey, Record};
    use crate::error::{Result, SuggestError};
    use crate::search::index::{Hit, SearchIndex, SearchQuery};
    use crate::storage::popularity::PopularityTable;
    use crate::storage::registry::{IndexRegistry, Partition, Vault};
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Index that reports a fixed document count and never matches.
    struct MarkerIndex(u64);

    impl SearchIndex for MarkerIndex {
        fn search(&self, _query: &SearchQuery, _limit: usize) -> Result<Vec<Hit>> {
            Ok(Vec::new())
        }

        fn document(&self, _doc_id: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn doc_count(&self) -> u64 {
            self.0
        }
    }

    fn partition(marker: u64) -> Partition {
        Partition::new(Box::new(MarkerIndex(marker)), Vault::new())
    }

    fn record(id: i64, name: &str) -> Record {
        Record {
            id,
            category: Category::Org,
            locale: Locale::Ru,
            name: name.to_string(),
            code: None,
            importance: 0,
        }
    }

    // ============================================================
    // REGISTRY TESTS
    // ============================================================

    #[test]
    fn test_get_before_install_is_partition_not_found() {
        let registry = IndexRegistry::new();

        let err = registry.get(Category::Code, Locale::Uk).err().unwrap();

        assert!(matches!(
            err,
            SuggestError::PartitionNotFound {
                category: Category::Code,
                locale: Locale::Uk
            }
        ));
        assert!(err.to_string().contains("atc-ua"));
    }

    #[test]
    fn test_install_then_get() {
        let registry = IndexRegistry::new();
        registry.install(PartitionKey::new(Category::Org, Locale::Ru), partition(3));

        let found = registry.get(Category::Org, Locale::Ru).unwrap();
        assert_eq!(found.index.doc_count(), 3);

        // Other keys are unaffected
        assert!(registry.get(Category::Org, Locale::Uk).is_err());
    }

    #[test]
    fn test_install_same_key_last_writer_wins() {
        let registry = IndexRegistry::new();
        let key = PartitionKey::new(Category::Info, Locale::Ru);

        registry.install(key, partition(1));
        registry.install(key, partition(2));

        assert_eq!(registry.get(Category::Info, Locale::Ru).unwrap().index.doc_count(), 2);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_install() {
        let registry = IndexRegistry::new();
        let key = PartitionKey::new(Category::Activity, Locale::Uk);
        registry.install(key, partition(1));

        let pinned = registry.snapshot();
        registry.install(key, partition(2));

        assert_eq!(pinned.get(Category::Activity, Locale::Uk).unwrap().index.doc_count(), 1);
        assert_eq!(registry.snapshot().get(Category::Activity, Locale::Uk).unwrap().index.doc_count(), 2);
    }

    #[test]
    fn test_old_partition_is_released_after_last_reader() {
        let registry = IndexRegistry::new();
        let key = PartitionKey::new(Category::Org, Locale::Ru);
        registry.install(key, partition(1));

        let held = registry.get(Category::Org, Locale::Ru).unwrap();
        assert_eq!(Arc::strong_count(&held), 2);

        registry.install(key, partition(2));

        // Only the reader keeps the old partition alive now
        assert_eq!(Arc::strong_count(&held), 1);
    }

    #[test]
    fn test_install_generation_replaces_all_given_keys() {
        let registry = IndexRegistry::new();
        registry.install(PartitionKey::new(Category::Code, Locale::Ru), partition(1));

        let batch: HashMap<PartitionKey, Partition> =
            PartitionKey::all().map(|key| (key, partition(9))).collect();
        registry.install_generation(batch);

        let generation = registry.snapshot();
        assert_eq!(generation.len(), 10);
        for key in PartitionKey::all() {
            assert_eq!(generation.get(key.category, key.locale).unwrap().index.doc_count(), 9);
        }
    }

    // ============================================================
    // VAULT TESTS
    // ============================================================

    #[test]
    fn test_vault_last_record_per_key_wins() {
        let mut vault = Vault::new();
        vault.insert("1".to_string(), record(1, "first"));
        vault.insert("1".to_string(), record(1, "second"));
        vault.insert("2".to_string(), record(2, "other"));

        assert_eq!(vault.len(), 2);
        assert_eq!(vault.get("1").unwrap().name, "second");
        assert!(vault.get("3").is_none());
    }

    // ============================================================
    // POPULARITY TESTS
    // ============================================================

    #[test]
    fn test_popularity_unknown_id_is_zero() {
        let table = PopularityTable::new();
        assert_eq!(table.get(7), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_popularity_refresh_merges_by_key() {
        let table = PopularityTable::new();
        table.upsert_many(vec![(1, 10), (2, 20)]);

        let applied = table.upsert_many(vec![(2, 25), (3, 30)]);

        assert_eq!(applied, 2);
        assert_eq!(table.get(1), 10, "IDs missing from a refresh keep their count");
        assert_eq!(table.get(2), 25);
        assert_eq!(table.get(3), 30);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_popularity_concurrent_upserts() {
        let table = Arc::new(PopularityTable::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let table = table.clone();
                std::thread::spawn(move || {
                    for i in 0..250 {
                        table.upsert(t * 1000 + i, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), 1000);
        assert_eq!(table.get(3249), 249);
    }
}
