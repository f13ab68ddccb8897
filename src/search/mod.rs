//! Search Module
//!
//! Answers suggestion queries against the installed partitions.
//!
//! ## Overview
//! A query is validated, normalized, and run once per category against the
//! caller's locale. Categories without direct hits are retried once with the
//! query re-read through the locale's keyboard layout, which catches text typed
//! with the wrong layout active. Hits are grouped by headword and ranked.
//!
//! ## Responsibilities
//! - **Indexing**: In-memory full-text index per partition (tantivy).
//! - **Resolution**: Per-category search with the layout fallback.
//! - **Ranking**: Locale-collated headwords; members by importance, sales, name.
//! - **API**: The select endpoints.
//!
//! ## Submodules
//! - **`collation`**: Locale-aware headword ordering.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`index`**: The `SearchIndex` trait and its tantivy implementation.
//! - **`query`**: Query text validation and query construction.
//! - **`ranking`**: The ranking engine.
//! - **`resolver`**: The query resolver.
//! - **`translit`**: Keyboard-layout transliteration.
//! - **`types`**: Request/response DTOs.

pub mod collation;
pub mod handlers;
pub mod index;
pub mod query;
pub mod ranking;
pub mod resolver;
pub mod translit;
pub mod types;
