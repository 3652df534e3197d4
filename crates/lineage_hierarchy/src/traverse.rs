//! Walking a parent's direct children.

use std::marker::PhantomData;

use lineage_foundation::Entity;
use lineage_storage::Registry;

use crate::components::{ChildSiblings, FirstChildInLinkedList, linked};
use crate::predicates::has_parent_components;
use crate::tag::HierarchyTag;
use crate::verify::assert_parent_pair;

/// Calls `visitor(registry, parent, child)` once per direct child of
/// `parent`, head first.
///
/// Each child's successor is read before the visitor runs, so the visitor
/// may unlink or destroy the child it was given. It must not unlink or
/// destroy children that have not been visited yet. Null or childless
/// parents are a no-op.
///
/// There is no cycle detection: a corrupted, cyclic list loops forever.
pub fn foreach_top_level_child<Tag, F>(registry: &mut Registry, parent: Entity, mut visitor: F)
where
    Tag: HierarchyTag,
    F: FnMut(&mut Registry, Entity, Entity),
{
    if parent.is_null() {
        return;
    }
    debug_assert!(registry.valid(parent), "{parent:?} is not a live entity");
    if !has_parent_components::<Tag>(registry, parent) {
        assert_parent_pair::<Tag>(registry, parent);
        return;
    }

    let mut current = linked::<FirstChildInLinkedList<Tag>>(registry, parent).first_id;
    while !current.is_null() {
        debug_assert!(current != parent, "{parent:?} is listed as its own child");
        let next = linked::<ChildSiblings<Tag>>(registry, current).next_id;

        visitor(registry, parent, current);

        debug_assert!(
            next.is_null() || registry.valid(next),
            "visitor destroyed unvisited sibling {next:?}"
        );
        current = next;
    }
}

pub use self::foreach_top_level_child as foreach_child_entity;

/// Read-only iterator over a parent's direct children, head first.
///
/// Borrowing the registry rules out mutation during the walk; use
/// [`foreach_top_level_child`] or a scoped view to mutate.
pub struct TopLevelChildren<'r, Tag: HierarchyTag> {
    registry: &'r Registry,
    current: Entity,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag: HierarchyTag> Iterator for TopLevelChildren<'_, Tag> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        if self.current.is_null() {
            return None;
        }
        let child = self.current;
        self.current = linked::<ChildSiblings<Tag>>(self.registry, child).next_id;
        Some(child)
    }
}

/// Iterates over `parent`'s direct children without mutating anything.
///
/// Yields nothing for null or childless parents.
#[must_use]
pub fn top_level_children<Tag: HierarchyTag>(
    registry: &Registry,
    parent: Entity,
) -> TopLevelChildren<'_, Tag> {
    let current = if has_parent_components::<Tag>(registry, parent) {
        linked::<FirstChildInLinkedList<Tag>>(registry, parent).first_id
    } else {
        Entity::null()
    };
    TopLevelChildren {
        registry,
        current,
        _tag: PhantomData,
    }
}
