//! Structural verification of hierarchies.
//!
//! The algorithms cross-check their O(1) answers against list walks and
//! component co-presence while [`VERIFY_ENABLED`] is set. The checks never
//! change what an algorithm returns; a failed check is a panic naming the
//! corruption. [`verify_parent`] and [`verify_child`] run the full walk on
//! demand and report problems as errors instead.

use lineage_foundation::{Entity, Error, ErrorContext, NULL_ENTITY, Result};
use lineage_storage::Registry;

use crate::components::{
    ChildSiblings, FirstChildInLinkedList, ParentEntity, TopLevelChildrenCount,
};
use crate::tag::{ChildCount, HierarchyTag};

/// Whether internal cross-checks run. On with debug assertions or the
/// `verify` feature.
pub const VERIFY_ENABLED: bool = cfg!(any(debug_assertions, feature = "verify"));

fn corrupted<Tag: HierarchyTag>(
    operation: &'static str,
    entity: Entity,
    message: String,
) -> Error {
    Error::corrupted(message).with_context(
        ErrorContext::new()
            .with_operation(operation)
            .with_hierarchy(Tag::name())
            .with_entity(entity),
    )
}

/// Checks every structural invariant of `parent`'s children list.
///
/// A parent with neither parent component passes trivially. Otherwise
/// both components must be present, the count must be positive, every
/// node must point back at `parent` and at its predecessor, and the walked
/// length must equal the count. The walk stops once it exceeds the count,
/// so a cycle is reported rather than looped on.
pub fn verify_parent<Tag: HierarchyTag>(registry: &Registry, parent: Entity) -> Result<()> {
    let fail = |message: String| corrupted::<Tag>("verify_parent", parent, message);

    let first = registry.try_get::<FirstChildInLinkedList<Tag>>(parent);
    let count = registry.try_get::<TopLevelChildrenCount<Tag>>(parent);
    let (first_id, size) = match (first, count) {
        (None, None) => return Ok(()),
        (Some(first), Some(count)) => (first.first_id, count.size),
        _ => return Err(fail(format!("{parent:?} carries only one parent component"))),
    };

    if size.is_zero() {
        return Err(fail(format!("{parent:?} has a zero children count")));
    }
    let expected = size.to_u64();

    let mut walked = 0u64;
    let mut prev = NULL_ENTITY;
    let mut current = first_id;
    while !current.is_null() {
        let (Some(siblings), Some(link)) = (
            registry.try_get::<ChildSiblings<Tag>>(current),
            registry.try_get::<ParentEntity<Tag>>(current),
        ) else {
            return Err(fail(format!("{current:?} is listed but lacks child components")));
        };
        if link.parent_id != parent {
            return Err(fail(format!(
                "{current:?} is listed under {parent:?} but names {:?}",
                link.parent_id
            )));
        }
        if siblings.prev_id != prev {
            return Err(fail(format!(
                "{current:?} has prev {:?}, expected {prev:?}",
                siblings.prev_id
            )));
        }

        walked += 1;
        if walked > expected {
            return Err(fail(format!(
                "list of {parent:?} is longer than its count {expected}"
            )));
        }
        prev = current;
        current = siblings.next_id;
    }

    if walked != expected {
        return Err(fail(format!(
            "list of {parent:?} has {walked} nodes, count says {expected}"
        )));
    }
    Ok(())
}

/// Checks that `child` appears exactly once in its parent's list.
///
/// An entity with neither child component passes trivially.
pub fn verify_child<Tag: HierarchyTag>(registry: &Registry, child: Entity) -> Result<()> {
    let fail = |message: String| corrupted::<Tag>("verify_child", child, message);

    let link = registry.try_get::<ParentEntity<Tag>>(child);
    let siblings = registry.try_get::<ChildSiblings<Tag>>(child);
    let parent = match (link, siblings) {
        (None, None) => return Ok(()),
        (Some(link), Some(_)) => link.parent_id,
        _ => return Err(fail(format!("{child:?} carries only one child component"))),
    };

    if parent.is_null() {
        return Err(fail(format!("{child:?} names the null entity as parent")));
    }
    let (Some(first), Some(count)) = (
        registry.try_get::<FirstChildInLinkedList<Tag>>(parent),
        registry.try_get::<TopLevelChildrenCount<Tag>>(parent),
    ) else {
        return Err(fail(format!("parent {parent:?} of {child:?} has no children list")));
    };

    let limit = count.size.to_u64();
    let mut seen = 0u32;
    let mut walked = 0u64;
    let mut current = first.first_id;
    while !current.is_null() && walked <= limit {
        if current == child {
            seen += 1;
        }
        walked += 1;
        current = registry
            .try_get::<ChildSiblings<Tag>>(current)
            .map_or(NULL_ENTITY, |node| node.next_id);
    }

    match seen {
        1 => Ok(()),
        0 => Err(fail(format!("{child:?} is missing from the list of {parent:?}"))),
        n => Err(fail(format!("{child:?} appears {n} times in the list of {parent:?}"))),
    }
}

/// Panics if `parent` carries exactly one of its two parent components.
#[track_caller]
pub(crate) fn assert_parent_pair<Tag: HierarchyTag>(registry: &Registry, parent: Entity) {
    if VERIFY_ENABLED {
        let first = registry.has::<FirstChildInLinkedList<Tag>>(parent);
        let count = registry.has::<TopLevelChildrenCount<Tag>>(parent);
        assert!(
            first == count,
            "hierarchy corrupted: {parent:?} carries only one parent component in {}",
            Tag::name()
        );
    }
}

/// Panics if `child` carries exactly one of its two child components.
#[track_caller]
pub(crate) fn assert_child_pair<Tag: HierarchyTag>(registry: &Registry, child: Entity) {
    if VERIFY_ENABLED {
        let link = registry.has::<ParentEntity<Tag>>(child);
        let siblings = registry.has::<ChildSiblings<Tag>>(child);
        assert!(
            link == siblings,
            "hierarchy corrupted: {child:?} carries only one child component in {}",
            Tag::name()
        );
    }
}
