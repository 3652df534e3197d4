//! A registry bound to one strand.
//!
//! The registry is not thread-safe. `SafeRegistry` records which strand owns
//! it and, when affinity checks are on, asserts on every checked access that
//! the caller is running on that strand. Release builds skip the check by
//! default.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use lineage_foundation::{Entity, Result};
use parking_lot::Mutex;
use tracing::trace;

use crate::component::Component;
use crate::config::RegistryConfig;
use crate::registry::Registry;
use crate::strand::{Strand, StrandId};

/// A `SafeRegistry` that can be moved into strand tasks.
pub type SharedRegistry = Arc<Mutex<SafeRegistry>>;

/// Strand-affine facade over a [`Registry`].
///
/// Checked access goes through `Deref`/`DerefMut` or [`Self::registry`] and
/// [`Self::registry_mut`].
#[derive(Debug)]
pub struct SafeRegistry {
    owner: StrandId,
    verify_affinity: bool,
    registry: Registry,
}

impl SafeRegistry {
    /// Creates an empty registry owned by `strand`.
    #[must_use]
    pub fn new(strand: &Strand) -> Self {
        Self::with_config(strand, &RegistryConfig::default())
    }

    /// Creates an empty registry owned by `strand`, configured by `config`.
    #[must_use]
    pub fn with_config(strand: &Strand, config: &RegistryConfig) -> Self {
        Self {
            owner: strand.id(),
            verify_affinity: config.verify_affinity,
            registry: Registry::with_config(config),
        }
    }

    /// Returns the owning strand's id.
    #[must_use]
    pub fn owner(&self) -> StrandId {
        self.owner
    }

    /// Returns true when the caller runs on the owning strand.
    #[must_use]
    pub fn running_in_this_thread(&self) -> bool {
        Strand::current() == Some(self.owner)
    }

    /// Panics when affinity checks are on and the caller is off-strand.
    fn assert_affinity(&self) {
        if self.verify_affinity {
            assert!(
                self.running_in_this_thread(),
                "registry owned by {} accessed from {:?}",
                self.owner,
                Strand::current()
            );
        }
    }

    /// Checked shared access.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.assert_affinity();
        &self.registry
    }

    /// Checked exclusive access.
    pub fn registry_mut(&mut self) -> &mut Registry {
        self.assert_affinity();
        &mut self.registry
    }

    /// Shared access without the affinity check.
    ///
    /// For diagnostics taken while the strand is known to be idle.
    #[must_use]
    pub fn registry_unchecked(&self) -> &Registry {
        &self.registry
    }

    /// Attaches `value` to `entity`, reusing an existing `T` in place.
    ///
    /// Pooled entities usually still carry the component from their last
    /// life; overwriting it avoids a storage insert.
    pub fn reset_or_create_component<T: Component>(
        &mut self,
        debug_name: &str,
        entity: Entity,
        value: T,
    ) -> Result<()> {
        let registry = self.registry_mut();
        if let Some(existing) = registry.try_get_mut::<T>(entity) {
            trace!(component = debug_name, ?entity, "using preallocated");
            *existing = value;
        } else {
            trace!(component = debug_name, ?entity, "allocating new");
            registry.emplace(entity, value)?;
        }
        Ok(())
    }

    /// Wraps the registry so strand tasks can share it.
    #[must_use]
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }
}

impl Deref for SafeRegistry {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        self.registry()
    }
}

impl DerefMut for SafeRegistry {
    fn deref_mut(&mut self) -> &mut Registry {
        self.registry_mut()
    }
}
