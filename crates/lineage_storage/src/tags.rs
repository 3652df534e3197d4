//! Lifecycle marker components shared by every subsystem.
//!
//! Entities are often pooled and constructed over several ticks. These
//! zero-sized tags record where an entity is in that lifecycle so views can
//! skip entities that are not ready for use.

use lineage_foundation::{Entity, Result};

use crate::component::{Exclude, exclude};
use crate::registry::Registry;

/// The entity is parked in a reuse pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnusedTag;

/// The entity is scheduled for destruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NeedToDestroyTag;

/// The entity is still being constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DelayedConstruction;

/// Construction finished during the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DelayedConstructionJustDone;

/// Tags carried by entities that must not be treated as live objects.
pub type NotConstructed = (NeedToDestroyTag, DelayedConstruction, UnusedTag);

/// Exclude filter that skips unused, dying, and half-built entities.
#[must_use]
pub const fn exclude_not_constructed() -> Exclude<NotConstructed> {
    exclude()
}

/// Marks `entity` as under construction again.
///
/// Adds [`DelayedConstruction`] (replacing an existing one) and clears any
/// leftover [`DelayedConstructionJustDone`] from a previous cycle.
pub fn populate_delayed_construction_components(
    registry: &mut Registry,
    entity: Entity,
) -> Result<()> {
    registry.emplace_or_replace(entity, DelayedConstruction)?;
    registry.remove_if_exists::<DelayedConstructionJustDone>(entity);
    Ok(())
}
