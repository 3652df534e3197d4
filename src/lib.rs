//! Lineage - Intrusive entity hierarchies
//!
//! This crate re-exports all layers of the Lineage system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: lineage_hierarchy  - Parent/child linked lists, traversal, bulk removal
//! Layer 1: lineage_storage    - Registry, sparse sets, views, strands
//! Layer 0: lineage_foundation - Core types (Entity, Error)
//! ```

pub use lineage_foundation as foundation;
pub use lineage_hierarchy as hierarchy;
pub use lineage_storage as storage;
