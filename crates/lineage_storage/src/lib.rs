//! Entity-component storage for Lineage.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation
//! - [`SparseSet`] - Per-type dense component storage with O(1) lookup
//! - [`Registry`] - The component store: typed get/has/emplace/remove and filtered views
//! - [`View`] - Include/exclude filtered iteration over entities
//! - [`AssociatedComponents`] - Per-type setup and teardown hooks for pooled entities
//! - [`Strand`] and [`SafeRegistry`] - Single-writer execution context and the registry bound to it

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod config;
pub mod entity;
pub mod lifetime;
pub mod registry;
pub mod safe_registry;
pub mod sparse_set;
pub mod strand;
pub mod tags;
pub mod type_names;
pub mod view;

pub use component::{Component, ComponentSet, Exclude, Include, exclude, include};
pub use config::{RegistryConfig, StrandConfig};
pub use entity::EntityStore;
pub use lifetime::{
    AssociatedComponents, populate_associated_components, remove_associated_components,
    reset_on_cache_reuse, validate_associated_components,
};
pub use registry::Registry;
pub use safe_registry::{SafeRegistry, SharedRegistry};
pub use sparse_set::SparseSet;
pub use strand::{Strand, StrandId};
pub use tags::{
    DelayedConstruction, DelayedConstructionJustDone, NeedToDestroyTag, NotConstructed,
    UnusedTag, exclude_not_constructed, populate_delayed_construction_components,
};
pub use type_names::TypeNames;
pub use view::View;
