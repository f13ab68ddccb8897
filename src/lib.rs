//! Multilingual Catalog Suggestion Service Library
//!
//! Autocomplete over a catalog of pharmaceutical entities published in two
//! locales. This library crate holds every subsystem; the binary (`main.rs`)
//! only wires them into an HTTP server.
//!
//! ## Architecture Modules
//!
//! - **`catalog`**: The data model. Categories, locales, partition addresses,
//!   records and the composite keys they are indexed and stored under.
//! - **`config`**: Settings from the environment and command-line flags.
//! - **`engine`**: The `Engine` that owns all service state and runs queries
//!   and uploads against it.
//! - **`error`**: The `SuggestError` taxonomy and its HTTP mapping.
//! - **`ingestion`**: CSV uploads. Builds every partition of a catalog upload
//!   off to the side and installs them in one swap; merges popularity counts.
//! - **`search`**: Full-text index, keyboard-layout transliteration, query
//!   resolution with layout fallback, and ranking.
//! - **`storage`**: The index registry (partitions per category and locale)
//!   and the popularity table.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod search;
pub mod storage;
