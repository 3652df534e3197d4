//! Filtered iteration over registry entities.

use std::any::TypeId;
use std::fmt;

use lineage_foundation::Entity;

use crate::component::ComponentSet;
use crate::registry::Registry;
use crate::sparse_set::ErasedStorage;

/// Entities carrying every included component and none of the excluded ones.
///
/// A view borrows the registry, so it cannot outlive a structural change.
/// Callers that need to mutate while walking take a snapshot with
/// [`View::entities`] first.
#[derive(Clone)]
pub struct View<'r> {
    registry: &'r Registry,
    include: Vec<TypeId>,
    exclude: Vec<TypeId>,
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |ids: &[TypeId]| -> Vec<&str> {
            ids.iter().map(|id| self.registry.type_name(*id)).collect()
        };
        f.debug_struct("View")
            .field("include", &names(&self.include))
            .field("exclude", &names(&self.exclude))
            .finish()
    }
}

impl<'r> View<'r> {
    pub(crate) fn new(registry: &'r Registry, include: Vec<TypeId>, exclude: Vec<TypeId>) -> Self {
        Self {
            registry,
            include,
            exclude,
        }
    }

    /// Narrows the view to entities also carrying every member of `I`.
    #[must_use]
    pub fn include<I: ComponentSet>(mut self) -> Self {
        self.include.extend(I::type_ids());
        self
    }

    /// Narrows the view to entities carrying none of `E`.
    #[must_use]
    pub fn exclude<E: ComponentSet>(mut self) -> Self {
        self.exclude.extend(E::type_ids());
        self
    }

    /// Picks the smallest included storage to drive iteration.
    ///
    /// `Ok(None)` means nothing is included, so every live entity is a
    /// candidate. `Err(())` means an included type has no storage and the
    /// view is empty.
    fn driver(&self) -> Result<Option<&'r dyn ErasedStorage>, ()> {
        let mut driver: Option<&'r dyn ErasedStorage> = None;
        for id in &self.include {
            let storage = self.registry.erased(*id).ok_or(())?;
            if driver.is_none_or(|current| storage.len() < current.len()) {
                driver = Some(storage);
            }
        }
        Ok(driver)
    }

    fn matches(&self, entity: Entity) -> bool {
        let has = |id: &TypeId| {
            self.registry
                .erased(*id)
                .is_some_and(|storage| storage.contains(entity))
        };
        self.include.iter().all(has) && !self.exclude.iter().any(has)
    }

    /// Iterates over matching entities.
    ///
    /// Order follows the driving storage's dense order, or entity index
    /// order when nothing is included.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Entity> + '_> {
        match self.driver() {
            Err(()) => Box::new(std::iter::empty()),
            Ok(None) => Box::new(self.registry.entities().filter(|e| self.matches(*e))),
            Ok(Some(storage)) => Box::new(
                storage
                    .entities()
                    .iter()
                    .copied()
                    .filter(|e| self.matches(*e)),
            ),
        }
    }

    /// Collects the matching entities into an owned snapshot.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.iter().collect()
    }

    /// Returns the first matching entity, if any.
    #[must_use]
    pub fn first(&self) -> Option<Entity> {
        self.iter().next()
    }

    /// Returns true if no entity matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    /// Counts matching entities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if `entity` is live and matches the filter.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.registry.valid(entity) && self.matches(entity)
    }
}

impl<'v> IntoIterator for &'v View<'_> {
    type Item = Entity;
    type IntoIter = Box<dyn Iterator<Item = Entity> + 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
