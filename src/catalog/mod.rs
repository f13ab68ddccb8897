//! Catalog Model Module
//!
//! The vocabulary shared by every other subsystem: which categories and locales
//! exist, what a stored record looks like, and how records are keyed.
//!
//! ## Submodules
//! - **`types`**: `Category`, `Locale`, `PartitionKey`, `Record`.
//! - **`keys`**: Composite key derivation and headword display helpers.

pub mod keys;
pub mod types;

#[cfg(test)]
mod tests;
