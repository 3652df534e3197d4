//! Entity lifecycle management with generational indices.
//!
//! The `EntityStore` manages entity allocation and tracks generations
//! to detect stale references to destroyed entities.

use lineage_foundation::{Entity, Error, Result};

/// Manages entity lifecycle and generation tracking.
///
/// Entities are allocated from a free list when available, otherwise
/// new indices are allocated. When an entity is destroyed, its index
/// is added to the free list and its generation is incremented.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Generation counter for each entity index.
    /// Even generations are free, odd generations are alive.
    generations: Vec<u32>,
    /// Free list of indices available for reuse.
    free_list: Vec<u32>,
    /// Count of live entities.
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity store with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live_count: 0,
        }
    }

    /// Spawns a new entity, returns its ID.
    ///
    /// Reuses indices from the free list when available.
    ///
    /// # Panics
    ///
    /// Panics if every representable index is in use.
    pub fn spawn(&mut self) -> Entity {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            // Was even/free, now odd/alive
            self.generations[idx] = self.generations[idx].wrapping_add(1);
            Entity::new(index, self.generations[idx])
        } else {
            // `u32::MAX` is the null sentinel and is never handed out
            let Some(index) = u32::try_from(self.generations.len())
                .ok()
                .filter(|index| *index != u32::MAX)
            else {
                panic!("entity index space exhausted");
            };
            // New entities start at generation 1 (odd = alive)
            self.generations.push(1);
            Entity::new(index, 1)
        }
    }

    /// Destroys an entity.
    ///
    /// Returns `Err` if the entity is stale or already destroyed.
    pub fn destroy(&mut self, id: Entity) -> Result<()> {
        self.validate(id)?;

        let idx = id.slot();
        // Was odd/alive, now even/free
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_list.push(id.index);
        self.live_count -= 1;

        Ok(())
    }

    /// Checks if an entity exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: Entity) -> bool {
        self.generations
            .get(id.slot())
            .is_some_and(|generation| *generation == id.generation && generation % 2 == 1)
    }

    /// Validates that an entity is live.
    ///
    /// Returns `Err` with context if the entity is stale or never existed.
    pub fn validate(&self, id: Entity) -> Result<()> {
        let Some(&current_gen) = self.generations.get(id.slot()) else {
            return Err(Error::entity_not_found(id));
        };

        if current_gen != id.generation {
            // Slot was recycled since this handle was issued
            return Err(Error::stale_entity(id));
        }

        if current_gen % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }

        Ok(())
    }

    /// Returns the total number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live entity IDs in index order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.generations
            .iter()
            .zip(0u32..)
            .filter(|(generation, _)| *generation % 2 == 1)
            .map(|(generation, index)| Entity::new(index, *generation))
    }

    /// Returns the current generation for an index, if it exists.
    #[must_use]
    pub fn generation(&self, index: u32) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }
}
