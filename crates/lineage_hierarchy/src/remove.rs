//! Unlinking children.
//!
//! [`remove_child_from_top_level`] either fully detaches a child or touches
//! nothing. The lower-level helpers below it are public for callers that
//! batch their own removals, as the bulk removal in this crate does.

use lineage_foundation::{Entity, NULL_ENTITY};
use lineage_storage::Registry;
use tracing::trace;

use crate::components::{
    ChildSiblings, FirstChildInLinkedList, ParentEntity, TopLevelChildrenCount, linked,
    linked_mut,
};
use crate::predicates::{has_child_components, has_parent_components, is_child_at_top_level_of};
use crate::tag::{ChildCount, HierarchyTag};
use crate::verify::{VERIFY_ENABLED, assert_child_pair, assert_parent_pair};

/// Detaches `child` from `parent`.
///
/// Returns `false` without touching anything if either id is null, `parent`
/// has no children, `child` is not linked, or `child` belongs to another
/// parent. Otherwise the child loses both child components, and the parent
/// loses both parent components if this was its last child.
///
/// # Panics
///
/// Panics if the hierarchy is found corrupted once membership is confirmed.
#[must_use]
pub fn remove_child_from_top_level<Tag: HierarchyTag>(
    registry: &mut Registry,
    parent: Entity,
    child: Entity,
) -> bool {
    if parent.is_null() || child.is_null() {
        return false;
    }
    debug_assert!(parent != child, "{parent:?} cannot be its own child");

    if !has_parent_components::<Tag>(registry, parent) {
        assert_parent_pair::<Tag>(registry, parent);
        return false;
    }
    if !has_child_components::<Tag>(registry, child) {
        assert_child_pair::<Tag>(registry, child);
        return false;
    }
    if !is_child_at_top_level_of::<Tag>(registry, parent, child) {
        return false;
    }

    // The head must advance using the pre-removal next pointer
    let next = linked::<ChildSiblings<Tag>>(registry, child).next_id;
    let first = linked_mut::<FirstChildInLinkedList<Tag>>(registry, parent);
    if first.first_id == child {
        first.first_id = next;
    }

    let spliced = remove_from_siblings::<Tag>(registry, child, child, NULL_ENTITY);
    assert!(
        spliced,
        "hierarchy corrupted: {child:?} vanished from the list of {parent:?}"
    );

    let count = linked_mut::<TopLevelChildrenCount<Tag>>(registry, parent);
    let Some(size) = count.size.checked_decrement() else {
        panic!("hierarchy corrupted: {parent:?} has a zero children count");
    };
    count.size = size;
    if size.is_zero() {
        remove_parent_components::<Tag>(registry, parent);
    }

    remove_child_components::<Tag>(registry, child);

    trace!(hierarchy = Tag::name(), ?parent, ?child, "unlinked child");
    debug_assert!(!is_child_at_top_level_of::<Tag>(registry, parent, child));
    true
}

pub use self::remove_child_from_top_level as remove_child_entity;

/// Splices `child_to_remove` out of a sibling list.
///
/// The search starts at `list_begin`, which is always examined, and stops
/// before `list_end`; a null `list_end` searches to the tail. Neighbours are
/// relinked around the node, but the node keeps its own stale `prev_id` and
/// `next_id`, and neither the parent's head pointer nor its count changes.
/// Returns `true` if the node was found.
#[must_use]
pub fn remove_from_siblings<Tag: HierarchyTag>(
    registry: &mut Registry,
    child_to_remove: Entity,
    list_begin: Entity,
    list_end: Entity,
) -> bool {
    if child_to_remove.is_null() || list_begin.is_null() {
        return false;
    }

    let mut current = list_begin;
    while !current.is_null() {
        let node = *linked::<ChildSiblings<Tag>>(registry, current);

        if current == child_to_remove {
            if !node.prev_id.is_null() {
                check_same_parent::<Tag>(registry, node.prev_id, current);
                linked_mut::<ChildSiblings<Tag>>(registry, node.prev_id).next_id = node.next_id;
            }
            if !node.next_id.is_null() {
                check_same_parent::<Tag>(registry, node.next_id, current);
                linked_mut::<ChildSiblings<Tag>>(registry, node.next_id).prev_id = node.prev_id;
            }
            return true;
        }

        current = node.next_id;
        if current == list_end {
            break;
        }
    }
    false
}

pub use self::remove_from_siblings as remove_child_links;

fn check_same_parent<Tag: HierarchyTag>(registry: &Registry, neighbour: Entity, node: Entity) {
    if VERIFY_ENABLED {
        let theirs = linked::<ParentEntity<Tag>>(registry, neighbour).parent_id;
        let ours = linked::<ParentEntity<Tag>>(registry, node).parent_id;
        assert_eq!(
            theirs, ours,
            "hierarchy corrupted: siblings {neighbour:?} and {node:?} disagree on their parent"
        );
    }
}

/// Strips both child components from `child`. Null is a no-op.
pub fn remove_child_components<Tag: HierarchyTag>(registry: &mut Registry, child: Entity) {
    if child.is_null() {
        return;
    }
    assert_child_pair::<Tag>(registry, child);
    let siblings = registry.remove_if_exists::<ChildSiblings<Tag>>(child);
    let link = registry.remove_if_exists::<ParentEntity<Tag>>(child);
    debug_assert!(
        siblings.is_some() && link.is_some(),
        "{child:?} carried no child components"
    );
}

/// Strips both parent components from `parent`. Null is a no-op.
pub fn remove_parent_components<Tag: HierarchyTag>(registry: &mut Registry, parent: Entity) {
    if parent.is_null() {
        return;
    }
    assert_parent_pair::<Tag>(registry, parent);
    let first = registry.remove_if_exists::<FirstChildInLinkedList<Tag>>(parent);
    let count = registry.remove_if_exists::<TopLevelChildrenCount<Tag>>(parent);
    debug_assert!(
        first.is_some() && count.is_some(),
        "{parent:?} carried no parent components"
    );
}
