//! Ingestion Module
//!
//! Turns CSV uploads into installed partitions and popularity counts.
//!
//! ## Workflow
//! 1. **Parse**: The CSV body is decoded into typed rows. A malformed row rejects
//!    the whole upload before anything is built.
//! 2. **Build**: The coordinator derives one `Record` per (row, locale), computes
//!    its composite keys, and fills a fresh index and vault for every partition.
//! 3. **Install**: All partitions are published to the registry in one swap.
//!
//! Popularity uploads skip steps 2 and 3: parsed rows are merged into the
//! popularity table by ID.
//!
//! ## Submodules
//! - **`coordinator`**: Partition building and installation.
//! - **`handlers`**: HTTP upload endpoints.
//! - **`parse`**: CSV decoding.
//! - **`types`**: Upload rows and responses.

pub mod coordinator;
pub mod handlers;
pub mod parse;
pub mod types;
