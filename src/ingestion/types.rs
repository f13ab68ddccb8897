//! Ingestion Data Types
//!
//! Upload rows as they arrive from the wire, and the responses returned once
//! an upload has been applied.

use crate::catalog::keys::normalize_code;
use crate::catalog::types::{Category, Locale, Record};
use serde::{Deserialize, Serialize};

/// One catalog entity as uploaded: shared identity plus a name per locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRow {
    pub category: Category,
    pub id: i64,
    pub name_ru: String,
    pub name_uk: String,
    pub importance: i64,
    /// Row-level locale tag. Only consulted by row-locale split ingestion.
    pub locale: Option<Locale>,
}

impl SuggestionRow {
    pub fn name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ru => &self.name_ru,
            Locale::Uk => &self.name_uk,
        }
    }

    /// The record this row contributes to `locale`'s partition.
    pub fn record(&self, locale: Locale) -> Record {
        let name = self.name(locale).to_string();
        let code = match self.category {
            Category::Code => Some(normalize_code(&name)),
            _ => None,
        };

        Record {
            id: self.id,
            category: self.category,
            locale,
            name,
            code,
            importance: self.importance,
        }
    }
}

/// Response to a catalog upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Data rows ingested (header excluded).
    pub rows: usize,
}

/// Response to a popularity upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct PopularityResponse {
    pub rows: usize,
    /// Popularity table size after the upload.
    pub total: usize,
}
