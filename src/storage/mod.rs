//! In-Memory Storage Module
//!
//! Holds all serving state. Nothing here is persisted; every generation is
//! rebuilt from a bulk upload.
//!
//! ## Core Concepts
//! - **Partition**: One search index plus one vault of records per `(category, locale)`.
//! - **Generation**: The full set of installed partitions, swapped as a unit.
//! - **Popularity**: Sale counters keyed by record ID, refreshed independently of partitions.

pub mod popularity;
pub mod registry;

#[cfg(test)]
mod tests;
