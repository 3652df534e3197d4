//! Relationship components.
//!
//! A hierarchy is threaded through four components. Parents carry
//! [`FirstChildInLinkedList`] and [`TopLevelChildrenCount`]; children carry
//! [`ParentEntity`] and [`ChildSiblings`]. Each pair is added and removed
//! together, and a parent with no children carries neither of its two.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use lineage_foundation::{Entity, NULL_ENTITY};
use lineage_storage::{Component, Registry};

use crate::tag::HierarchyTag;

/// Points a child at its parent.
pub struct ParentEntity<Tag: HierarchyTag> {
    /// The parent, never null while the component exists.
    pub parent_id: Entity,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag: HierarchyTag> ParentEntity<Tag> {
    /// Creates the component.
    #[must_use]
    pub fn new(parent_id: Entity) -> Self {
        Self {
            parent_id,
            _tag: PhantomData,
        }
    }
}

/// A node of the doubly-linked list of children sharing one parent.
pub struct ChildSiblings<Tag: HierarchyTag> {
    /// Previous sibling, or null at the head.
    pub prev_id: Entity,
    /// Next sibling, or null at the tail.
    pub next_id: Entity,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag: HierarchyTag> ChildSiblings<Tag> {
    /// Creates the component.
    #[must_use]
    pub fn new(prev_id: Entity, next_id: Entity) -> Self {
        Self {
            prev_id,
            next_id,
            _tag: PhantomData,
        }
    }

    /// A node with no neighbours.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(NULL_ENTITY, NULL_ENTITY)
    }
}

/// Alternative name for [`ChildSiblings`].
pub type ChildLinkedList<Tag> = ChildSiblings<Tag>;

/// Head of a parent's children list.
pub struct FirstChildInLinkedList<Tag: HierarchyTag> {
    /// The first child; its `prev_id` is null.
    pub first_id: Entity,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag: HierarchyTag> FirstChildInLinkedList<Tag> {
    /// Creates the component.
    #[must_use]
    pub fn new(first_id: Entity) -> Self {
        Self {
            first_id,
            _tag: PhantomData,
        }
    }
}

/// Number of direct children of a parent. Always at least one.
pub struct TopLevelChildrenCount<Tag: HierarchyTag> {
    /// The count.
    pub size: Tag::Size,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag: HierarchyTag> TopLevelChildrenCount<Tag> {
    /// Creates the component.
    #[must_use]
    pub fn new(size: Tag::Size) -> Self {
        Self {
            size,
            _tag: PhantomData,
        }
    }
}

/// Alternative name for [`TopLevelChildrenCount`].
pub type ChildLinkedListSize<Tag> = TopLevelChildrenCount<Tag>;

// Derives would demand the same traits of the tag, which is never built.
macro_rules! impl_tagged_component {
    ($name:ident { $($field:ident),+ }) => {
        impl<Tag: HierarchyTag> Clone for $name<Tag> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<Tag: HierarchyTag> Copy for $name<Tag> {}

        impl<Tag: HierarchyTag> PartialEq for $name<Tag> {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }

        impl<Tag: HierarchyTag> Eq for $name<Tag> {}

        impl<Tag: HierarchyTag> fmt::Debug for $name<Tag> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("tag", &Tag::name())
                    $(.field(stringify!($field), &self.$field))+
                    .finish()
            }
        }
    };
}

impl_tagged_component!(ParentEntity { parent_id });
impl_tagged_component!(ChildSiblings { prev_id, next_id });
impl_tagged_component!(FirstChildInLinkedList { first_id });
impl_tagged_component!(TopLevelChildrenCount { size });

/// Fetches a component whose presence the caller has already established.
///
/// # Panics
///
/// Panics if it is missing, which means the hierarchy is corrupted.
#[track_caller]
pub(crate) fn linked<T: Component>(registry: &Registry, entity: Entity) -> &T {
    match registry.try_get::<T>(entity) {
        Some(component) => component,
        None => missing::<T>(entity),
    }
}

/// Mutable counterpart of [`linked`].
#[track_caller]
pub(crate) fn linked_mut<T: Component>(registry: &mut Registry, entity: Entity) -> &mut T {
    match registry.try_get_mut::<T>(entity) {
        Some(component) => component,
        None => missing::<T>(entity),
    }
}

/// Emplaces a component the caller has established is absent.
///
/// # Panics
///
/// Panics if `entity` is dead or already carries a `T`.
#[track_caller]
pub(crate) fn attach<T: Component>(registry: &mut Registry, entity: Entity, value: T) {
    if let Err(err) = registry.emplace(entity, value) {
        panic!("cannot attach {} to {entity:?}: {err}", type_name::<T>());
    }
}

#[cold]
#[track_caller]
fn missing<T>(entity: Entity) -> ! {
    panic!(
        "hierarchy corrupted: {entity:?} is linked but lacks {}",
        type_name::<T>()
    )
}
