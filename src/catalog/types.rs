//! Catalog Data Types
//!
//! The closed vocabularies of the catalog (categories and locales) and the
//! record stored for every entity occurrence.

use crate::error::SuggestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five entity classes. The wire tags (`atc`, `inf`, `inn`, `act`,
/// `org`) are the identifiers used by uploads and partition names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Drug classification codes. Records carry a `code` disambiguator.
    Code,
    /// Informational listings, ranked as one flat pool.
    Info,
    RegNumber,
    Activity,
    Org,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Code,
        Category::Info,
        Category::RegNumber,
        Category::Activity,
        Category::Org,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Category::Code => "atc",
            Category::Info => "inf",
            Category::RegNumber => "inn",
            Category::Activity => "act",
            Category::Org => "org",
        }
    }

    /// Parses a wire tag. `info` is the legacy alias of `inf`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "atc" => Some(Category::Code),
            "inf" | "info" => Some(Category::Info),
            "inn" => Some(Category::RegNumber),
            "act" => Some(Category::Activity),
            "org" => Some(Category::Org),
            _ => None,
        }
    }

    /// Informational listings are not grouped by headword.
    pub fn is_pooled(self) -> bool {
        self == Category::Info
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_tag(s).ok_or_else(|| SuggestError::invalid(format!("unknown category: {:?}", s)))
    }
}

/// The two display-language variants of the catalog. `Ru` is locale A and the
/// default whenever the caller gives no usable hint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Ru,
    Uk,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ru, Locale::Uk];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Uk => "ua",
        }
    }

    /// Row-level locale tag of an upload row. Empty means "no tag".
    pub fn from_row_tag(tag: &str) -> Result<Option<Self>, SuggestError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "ru" => Ok(Some(Locale::Ru)),
            "ua" | "uk" => Ok(Some(Locale::Uk)),
            other => Err(SuggestError::invalid(format!("unknown locale tag: {:?}", other))),
        }
    }

    /// Picks the locale from a free-text language hint such as an
    /// `Accept-Language` header. A substring match, not a language-tag parse.
    pub fn from_language_hint(hint: Option<&str>) -> Self {
        match hint.map(str::to_ascii_lowercase) {
            Some(h) if h.contains("uk") || h.contains("ua") => Locale::Uk,
            _ => Locale::Ru,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Address of one category-locale partition, rendered as e.g. `atc-ru`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey {
    pub category: Category,
    pub locale: Locale,
}

impl PartitionKey {
    pub fn new(category: Category, locale: Locale) -> Self {
        Self { category, locale }
    }

    /// All 10 partitions that exist at steady state.
    pub fn all() -> impl Iterator<Item = PartitionKey> {
        Category::ALL
            .into_iter()
            .flat_map(|category| Locale::ALL.into_iter().map(move |locale| PartitionKey::new(category, locale)))
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.locale)
    }
}

/// One entity occurrence in one locale.
///
/// Sale counts are not stored here; they are read from the `PopularityTable`
/// at rank time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub category: Category,
    pub locale: Locale,
    pub name: String,
    /// Normalized classification code, `Code` category only.
    pub code: Option<String>,
    pub importance: i64,
}
