//! Per-type hooks for setting up and tearing down pooled entities.
//!
//! A type implementing [`AssociatedComponents`] owns a group of components
//! that travel together: a hierarchy's links, the construction markers, and
//! so on. Pools call the free functions below instead of knowing every
//! component a subsystem attaches.

use lineage_foundation::{Entity, Result};
use tracing::trace;

use crate::registry::Registry;
use crate::tags::{DelayedConstruction, DelayedConstructionJustDone};

/// The components a type attaches to an entity, and how to manage them.
///
/// Implementors are usually markers that are never instantiated.
pub trait AssociatedComponents: 'static {
    /// Creates the components with their initial values.
    ///
    /// The entity may still carry some of them if it came out of a pool.
    fn populate(registry: &mut Registry, entity: Entity) -> Result<()>;

    /// Strips the components. Entities without them are left alone.
    fn remove(registry: &mut Registry, entity: Entity);

    /// Returns true if the components exist and hold consistent values.
    fn validate(registry: &Registry, entity: Entity) -> bool;

    /// Brings an entity taken back out of a pool to a fresh state.
    ///
    /// Defaults to [`remove`](Self::remove).
    fn reset_on_cache_reuse(registry: &mut Registry, entity: Entity) {
        Self::remove(registry, entity);
    }
}

/// Runs [`AssociatedComponents::populate`] for `T`.
pub fn populate_associated_components<T: AssociatedComponents>(
    registry: &mut Registry,
    entity: Entity,
) -> Result<()> {
    trace!(associated = std::any::type_name::<T>(), ?entity, "populating");
    T::populate(registry, entity)
}

/// Runs [`AssociatedComponents::remove`] for `T`.
///
/// Destroying an entity already drops everything; this is for entities
/// that live on.
pub fn remove_associated_components<T: AssociatedComponents>(
    registry: &mut Registry,
    entity: Entity,
) {
    trace!(associated = std::any::type_name::<T>(), ?entity, "removing");
    T::remove(registry, entity);
}

/// Runs [`AssociatedComponents::validate`] for `T`.
#[must_use]
pub fn validate_associated_components<T: AssociatedComponents>(
    registry: &Registry,
    entity: Entity,
) -> bool {
    T::validate(registry, entity)
}

/// Runs [`AssociatedComponents::reset_on_cache_reuse`] for `T`.
pub fn reset_on_cache_reuse<T: AssociatedComponents>(registry: &mut Registry, entity: Entity) {
    trace!(associated = std::any::type_name::<T>(), ?entity, "resetting for reuse");
    T::reset_on_cache_reuse(registry, entity);
}

/// The construction markers.
impl AssociatedComponents for DelayedConstruction {
    fn populate(registry: &mut Registry, entity: Entity) -> Result<()> {
        crate::tags::populate_delayed_construction_components(registry, entity)
    }

    fn remove(registry: &mut Registry, entity: Entity) {
        registry.remove_if_exists::<DelayedConstruction>(entity);
        registry.remove_if_exists::<DelayedConstructionJustDone>(entity);
    }

    fn validate(registry: &Registry, entity: Entity) -> bool {
        registry.has::<DelayedConstruction>(entity)
            && !registry.has::<DelayedConstructionJustDone>(entity)
    }

    fn reset_on_cache_reuse(registry: &mut Registry, entity: Entity) {
        // A pooled entity is rebuilt from scratch
        if let Err(err) = Self::populate(registry, entity) {
            trace!(?entity, %err, "cannot restart construction");
        }
    }
}
