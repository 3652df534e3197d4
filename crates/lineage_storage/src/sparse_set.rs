//! Sparse-set storage for a single component type.
//!
//! Components are packed in a dense array alongside the entity that owns
//! each slot. A sparse array indexed by entity slot maps back into the dense
//! array, giving O(1) lookup, insertion, and swap-removal.

// Dense positions are bounded by `u32::MAX` on insertion
#![allow(clippy::cast_possible_truncation)]

use std::any::Any;

use lineage_foundation::Entity;

/// Marks an unused sparse slot.
const EMPTY: u32 = u32::MAX;

/// Dense storage for one component type, keyed by entity.
///
/// Iteration order is the dense order: insertion order, disturbed only by
/// swap-removal.
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    /// Entity slot -> dense position (`EMPTY` when absent).
    sparse: Vec<u32>,
    /// Dense position -> owning entity.
    dense: Vec<Entity>,
    /// Dense position -> component value.
    data: Vec<T>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            data: Vec::new(),
        }
    }

    fn position(&self, entity: Entity) -> Option<usize> {
        let pos = *self.sparse.get(entity.slot())?;
        if pos == EMPTY {
            return None;
        }
        let pos = pos as usize;
        // The slot may belong to an older generation of this index
        (self.dense[pos] == entity).then_some(pos)
    }

    /// Returns true if `entity` has a value in this set.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.position(entity).is_some()
    }

    /// Returns the value stored for `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.position(entity).map(|pos| &self.data[pos])
    }

    /// Returns the value stored for `entity` mutably.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.position(entity).map(|pos| &mut self.data[pos])
    }

    /// Stores `value` for `entity`, returning the previous value if any.
    ///
    /// # Panics
    ///
    /// Panics if the set already holds `u32::MAX - 1` values.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(pos) = self.position(entity) {
            return Some(std::mem::replace(&mut self.data[pos], value));
        }

        let slot = entity.slot();
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, EMPTY);
        }

        let Ok(pos) = u32::try_from(self.dense.len()) else {
            panic!("sparse set capacity exhausted");
        };
        self.sparse[slot] = pos;
        self.dense.push(entity);
        self.data.push(value);
        None
    }

    /// Removes and returns the value stored for `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let pos = self.position(entity)?;

        self.dense.swap_remove(pos);
        let value = self.data.swap_remove(pos);
        self.sparse[entity.slot()] = EMPTY;

        // The former last element now lives at `pos`
        if let Some(moved) = self.dense.get(pos) {
            self.sparse[moved.slot()] = pos as u32;
        }

        Some(value)
    }

    /// Returns the entities that own a value, in dense order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.dense
    }

    /// Iterates over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.dense.iter().copied().zip(self.data.iter())
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.data.clear();
    }
}

/// Type-erased access to a [`SparseSet`], used by the registry to manage
/// storages of every component type uniformly.
pub(crate) trait ErasedStorage: Send {
    fn contains(&self, entity: Entity) -> bool;
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn entities(&self) -> &[Entity];
    fn len(&self) -> usize;
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Send + 'static> ErasedStorage for SparseSet<T> {
    fn contains(&self, entity: Entity) -> bool {
        SparseSet::contains(self, entity)
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn entities(&self) -> &[Entity] {
        SparseSet::entities(self)
    }

    fn len(&self) -> usize {
        SparseSet::len(self)
    }

    fn clear(&mut self) {
        SparseSet::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
