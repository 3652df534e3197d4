//! The component registry.
//!
//! A [`Registry`] owns the entity allocator and one [`SparseSet`] per
//! component type. Storages are created lazily the first time a type is
//! emplaced; the registry records the type's name at the same moment so
//! diagnostics can name components it only knows by `TypeId`.

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use lineage_foundation::{Entity, Error, ErrorKind, Result};
use tracing::trace;

use crate::component::{Component, ComponentSet, Exclude, Include};
use crate::config::RegistryConfig;
use crate::entity::EntityStore;
use crate::sparse_set::{ErasedStorage, SparseSet};
use crate::type_names::TypeNames;
use crate::view::View;

/// Entity-component store with typed point access and filtered views.
///
/// Not internally synchronized. Wrap it in a
/// [`SafeRegistry`](crate::SafeRegistry) to pin mutation to one strand.
#[derive(Default)]
pub struct Registry {
    entities: EntityStore,
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
    type_names: TypeNames,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.entities.len())
            .field("storages", &self.storages.len())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry sized according to `config`.
    #[must_use]
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            entities: EntityStore::with_capacity(config.entity_capacity),
            storages: HashMap::new(),
            type_names: TypeNames::new(),
        }
    }

    // --- Entities ---

    /// Allocates a new entity with no components.
    pub fn create(&mut self) -> Entity {
        self.entities.spawn()
    }

    /// Destroys an entity and every component attached to it.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.validate(entity)?;

        let mut removed = 0usize;
        for storage in self.storages.values_mut() {
            if storage.remove_entity(entity) {
                removed += 1;
            }
        }
        self.entities.destroy(entity)?;

        trace!(?entity, components = removed, "destroyed entity");
        Ok(())
    }

    /// Returns true if `entity` is live. The null entity is never valid.
    #[must_use]
    pub fn valid(&self, entity: Entity) -> bool {
        !entity.is_null() && self.entities.exists(entity)
    }

    /// Checks that `entity` is live, explaining why not otherwise.
    pub fn validate(&self, entity: Entity) -> Result<()> {
        if entity.is_null() {
            return Err(Error::new(ErrorKind::NullEntity));
        }
        self.entities.validate(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over all live entities in index order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    // --- Storage access ---

    /// Returns the storage for `T`, if one was ever created.
    #[must_use]
    pub fn storage<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut SparseSet<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut())
    }

    /// Returns the storage for `T`, creating it on first use.
    fn assure<T: Component>(&mut self) -> &mut SparseSet<T> {
        let id = TypeId::of::<T>();
        if !self.storages.contains_key(&id) {
            self.type_names.record::<T>();
            self.storages.insert(id, Box::new(SparseSet::<T>::new()));
        }
        match self
            .storages
            .get_mut(&id)
            .and_then(|storage| storage.as_any_mut().downcast_mut())
        {
            Some(storage) => storage,
            None => unreachable!("storage keyed by TypeId holds a different type"),
        }
    }

    pub(crate) fn erased(&self, id: TypeId) -> Option<&dyn ErasedStorage> {
        self.storages.get(&id).map(|storage| &**storage)
    }

    // --- Components ---

    /// Returns true if `entity` carries a `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>()
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Returns the `T` attached to `entity`.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.validate(entity)?;
        self.try_get(entity)
            .ok_or_else(|| Error::component_not_found(entity, type_name::<T>()))
    }

    /// Returns the `T` attached to `entity`, if any.
    #[must_use]
    pub fn try_get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Returns the `T` attached to `entity` mutably.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.validate(entity)?;
        self.try_get_mut(entity)
            .ok_or_else(|| Error::component_not_found(entity, type_name::<T>()))
    }

    /// Returns the `T` attached to `entity` mutably, if any.
    pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Attaches `value` to `entity`.
    ///
    /// Fails if the entity is not live or already carries a `T`.
    pub fn emplace<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
        self.validate(entity)?;
        if self.has::<T>(entity) {
            return Err(Error::duplicate_component(entity, type_name::<T>()));
        }
        self.assure::<T>().insert(entity, value);
        Ok(())
    }

    /// Attaches `value` to `entity`, returning the value it replaced.
    pub fn emplace_or_replace<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<Option<T>> {
        self.validate(entity)?;
        Ok(self.assure::<T>().insert(entity, value))
    }

    /// Detaches and returns the `T` attached to `entity`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T> {
        self.validate(entity)?;
        self.remove_if_exists(entity)
            .ok_or_else(|| Error::component_not_found(entity, type_name::<T>()))
    }

    /// Detaches the `T` attached to `entity`, if there is one.
    pub fn remove_if_exists<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Detaches `T` from every entity.
    pub fn clear<T: Component>(&mut self) {
        if let Some(storage) = self.storage_mut::<T>() {
            storage.clear();
        }
    }

    /// Returns the number of entities carrying a `T`.
    #[must_use]
    pub fn count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, SparseSet::len)
    }

    /// Calls `visitor` with the type id of every component on `entity`.
    ///
    /// Visiting order is unspecified.
    pub fn visit(&self, entity: Entity, mut visitor: impl FnMut(TypeId)) {
        for (id, storage) in &self.storages {
            if storage.contains(entity) {
                visitor(*id);
            }
        }
    }

    // --- Views ---

    /// Returns a view over entities carrying every member of `I`.
    #[must_use]
    pub fn view<I: ComponentSet>(&self) -> View<'_> {
        View::new(self, I::type_ids(), Vec::new())
    }

    /// Returns a view over entities carrying all of `I` and none of `E`.
    #[must_use]
    pub fn view_filtered<I: ComponentSet, E: ComponentSet>(
        &self,
        _include: Include<I>,
        _exclude: Exclude<E>,
    ) -> View<'_> {
        View::new(self, I::type_ids(), E::type_ids())
    }

    // --- Type names ---

    /// Returns the type-name table.
    #[must_use]
    pub fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    /// Sets the debug name reported for component type `T`.
    pub fn register_type_name<T: Component>(&mut self, name: impl Into<Cow<'static, str>>) {
        self.type_names.register::<T>(name);
    }

    /// Returns the debug name for a component type id.
    #[must_use]
    pub fn type_name(&self, id: TypeId) -> &str {
        self.type_names.name_of(id)
    }
}
