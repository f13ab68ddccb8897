//! Popularity Table
//!
//! Process-wide `record ID -> sale count`. Uploads upsert by key: IDs absent
//! from an upload keep their previous count. Readers may see a refresh half
//! applied across keys, but each key is always a whole value.

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct PopularityTable {
    sales: DashMap<i64, i64>,
}

impl PopularityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sale count of `id`, zero when unknown.
    pub fn get(&self, id: i64) -> i64 {
        self.sales.get(&id).map(|count| *count).unwrap_or(0)
    }

    pub fn upsert(&self, id: i64, count: i64) {
        self.sales.insert(id, count);
    }

    /// Applies every `(id, count)` pair; returns how many were applied.
    pub fn upsert_many<I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut applied = 0;
        for (id, count) in rows {
            self.upsert(id, count);
            applied += 1;
        }
        applied
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}
