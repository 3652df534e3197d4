//! Scoped snapshots of a parent's children.
//!
//! Tagging the children with a marker component turns "the children of P"
//! into an ordinary registry view that stays valid while the hierarchy is
//! restructured. The guard strips the marker again when it goes out of
//! scope.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use lineage_foundation::Entity;
use lineage_storage::{Component, Registry, View};

use crate::components::attach;
use crate::predicates::is_child_at_top_level_of;
use crate::tag::HierarchyTag;
use crate::traverse::foreach_top_level_child;

/// Marker placed on the children captured by [`view_top_level_children`].
pub struct ChildrenToView<Tag: HierarchyTag>(PhantomData<fn() -> Tag>);

impl<Tag: HierarchyTag> Default for ChildrenToView<Tag> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<Tag: HierarchyTag> fmt::Debug for ChildrenToView<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChildrenToView").field(&Tag::name()).finish()
    }
}

/// Guard over every entity carrying marker `M`.
///
/// Holds the registry exclusively; registry access while the guard lives
/// goes through it. Dropping the guard removes `M` from every entity.
pub struct ScopedChildView<'r, M: Component> {
    registry: &'r mut Registry,
    _marker: PhantomData<fn() -> M>,
}

impl<'r, M: Component> ScopedChildView<'r, M> {
    /// Takes over cleanup of marker `M` in `registry`.
    ///
    /// Only the marking functions in this crate build guards, so a guard
    /// always covers markers it placed itself.
    pub(crate) fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            _marker: PhantomData,
        }
    }

    /// Returns a view over the marked entities.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        self.registry.view::<(M,)>()
    }

    /// Snapshots the marked entities.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.view().entities()
    }

    /// Returns the number of marked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.count::<M>()
    }

    /// Returns true if no entity is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared access to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &*self.registry
    }

    /// Exclusive access to the underlying registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut *self.registry
    }
}

impl<M: Component> Deref for ScopedChildView<'_, M> {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        &*self.registry
    }
}

impl<M: Component> DerefMut for ScopedChildView<'_, M> {
    fn deref_mut(&mut self) -> &mut Registry {
        &mut *self.registry
    }
}

impl<M: Component> Drop for ScopedChildView<'_, M> {
    fn drop(&mut self) {
        self.registry.clear::<M>();
    }
}

impl<M: Component> fmt::Debug for ScopedChildView<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedChildView")
            .field("marker", &std::any::type_name::<M>())
            .field("len", &self.len())
            .finish()
    }
}

/// Marks every direct child of `parent` and returns a guard over them.
///
/// The guard's view keeps yielding the captured children even after they
/// are unlinked, which makes it the safe way to restructure a family while
/// iterating it. Null or childless parents give an empty view.
pub fn view_top_level_children<Tag: HierarchyTag>(
    registry: &mut Registry,
    parent: Entity,
) -> ScopedChildView<'_, ChildrenToView<Tag>> {
    debug_assert!(
        registry.count::<ChildrenToView<Tag>>() == 0,
        "a scoped child view of {} is already outstanding",
        Tag::name()
    );

    foreach_top_level_child::<Tag, _>(registry, parent, |registry, parent, child| {
        debug_assert!(parent != child);
        debug_assert!(is_child_at_top_level_of::<Tag>(registry, parent, child));
        attach(registry, child, ChildrenToView::<Tag>::default());
    });

    ScopedChildView::new(registry)
}

pub use self::view_top_level_children as view_child_entities;
