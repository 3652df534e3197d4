//! Structural questions about an entity's place in a hierarchy.
//!
//! All predicates are pure reads and safe to call from inside a traversal
//! visitor.

use lineage_foundation::Entity;
use lineage_storage::Registry;

use crate::components::{
    ChildSiblings, FirstChildInLinkedList, ParentEntity, TopLevelChildrenCount, linked,
};
use crate::tag::HierarchyTag;
use crate::verify::{VERIFY_ENABLED, assert_child_pair, assert_parent_pair};

/// Returns true if `id` is a live entity carrying both parent components.
#[must_use]
pub fn has_parent_components<Tag: HierarchyTag>(registry: &Registry, id: Entity) -> bool {
    registry.valid(id)
        && registry.has::<FirstChildInLinkedList<Tag>>(id)
        && registry.has::<TopLevelChildrenCount<Tag>>(id)
}

/// Returns true if `id` is a live entity carrying both child components.
#[must_use]
pub fn has_child_components<Tag: HierarchyTag>(registry: &Registry, id: Entity) -> bool {
    registry.valid(id)
        && registry.has::<ParentEntity<Tag>>(id)
        && registry.has::<ChildSiblings<Tag>>(id)
}

/// Walks `parent`'s children list looking for `child_to_find`.
///
/// Linear in the number of children. Prefer [`is_parent_at_top_level_of`]
/// outside of verification.
#[must_use]
pub fn has_child_at_top_level<Tag: HierarchyTag>(
    registry: &Registry,
    parent: Entity,
    child_to_find: Entity,
) -> bool {
    if parent.is_null() || child_to_find.is_null() {
        return false;
    }
    debug_assert!(registry.valid(parent), "{parent:?} is not a live entity");
    debug_assert!(
        registry.valid(child_to_find),
        "{child_to_find:?} is not a live entity"
    );

    if !has_parent_components::<Tag>(registry, parent) {
        assert_parent_pair::<Tag>(registry, parent);
        return false;
    }

    let mut current = linked::<FirstChildInLinkedList<Tag>>(registry, parent).first_id;
    while !current.is_null() {
        if current == child_to_find {
            return true;
        }
        current = linked::<ChildSiblings<Tag>>(registry, current).next_id;
    }
    false
}

pub use self::has_child_at_top_level as has_child_in_linked_list;

/// Returns true if `child` is a direct child of `parent`.
///
/// Constant time: only the child's `ParentEntity` is consulted. With
/// verification enabled the answer is cross-checked against a list walk.
#[must_use]
pub fn is_parent_at_top_level_of<Tag: HierarchyTag>(
    registry: &Registry,
    parent: Entity,
    child: Entity,
) -> bool {
    if parent.is_null() || child.is_null() {
        return false;
    }
    if !has_parent_components::<Tag>(registry, parent) {
        assert_parent_pair::<Tag>(registry, parent);
        return false;
    }
    if !has_child_components::<Tag>(registry, child) {
        assert_child_pair::<Tag>(registry, child);
        return false;
    }

    let by_component = linked::<ParentEntity<Tag>>(registry, child).parent_id == parent;
    if VERIFY_ENABLED {
        assert_eq!(
            by_component,
            has_child_at_top_level::<Tag>(registry, parent, child),
            "hierarchy corrupted: ParentEntity of {child:?} disagrees with the list of {parent:?} in {}",
            Tag::name()
        );
    }
    by_component
}

pub use self::is_parent_at_top_level_of as is_child_at_top_level_of;
pub use self::is_parent_at_top_level_of as is_parent_of;
pub use self::is_parent_at_top_level_of as is_child_of;

/// Returns the parent of `child`, or `None` if it is not linked.
#[must_use]
pub fn parent_of<Tag: HierarchyTag>(registry: &Registry, child: Entity) -> Option<Entity> {
    if !has_child_components::<Tag>(registry, child) {
        return None;
    }
    Some(linked::<ParentEntity<Tag>>(registry, child).parent_id)
}

/// Returns how many direct children `parent` has.
#[must_use]
pub fn top_level_children_count<Tag: HierarchyTag>(
    registry: &Registry,
    parent: Entity,
) -> Option<Tag::Size> {
    registry
        .try_get::<TopLevelChildrenCount<Tag>>(parent)
        .map(|count| count.size)
}
