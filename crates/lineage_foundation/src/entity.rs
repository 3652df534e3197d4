//! Entity identifiers with generational indices.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entity identifier with generational index for stale reference detection.
///
/// An entity owns no memory; it is a key into the component store. The
/// generation counter changes whenever a slot is reused after destruction,
/// so a stale handle never aliases the entity that replaced it.
///
/// # Layout
/// - `index`: 32-bit slot index into component storage
/// - `generation`: 32-bit generation counter
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    /// Slot index into entity storage.
    pub index: u32,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

/// The reserved "no entity" value.
///
/// Used by relationship components for missing links (no previous sibling,
/// no next sibling, no first child).
pub const NULL_ENTITY: Entity = Entity::null();

impl Entity {
    /// Creates a new entity handle with the given index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the sentinel value representing "no entity".
    ///
    /// This uses `u32::MAX` as the index, which is never allocated.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u32::MAX,
            generation: 0,
        }
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u32::MAX
    }

    /// Returns the slot index as `usize` for indexing sparse arrays.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.index as usize
    }
}

impl Default for Entity {
    fn default() -> Self {
        NULL_ENTITY
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}", self.index)
        }
    }
}
