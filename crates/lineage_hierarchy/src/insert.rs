//! Linking a child under a parent.
//!
//! Children are always inserted at the head of the parent's list, which
//! keeps insertion O(1) without a tail pointer. Children therefore come back
//! in reverse insertion order.

use lineage_foundation::{Entity, Error, ErrorContext, ErrorKind, NULL_ENTITY, Result};
use lineage_storage::Registry;
use tracing::trace;

use crate::components::{
    ChildSiblings, FirstChildInLinkedList, ParentEntity, TopLevelChildrenCount, attach,
    linked_mut,
};
use crate::tag::{ChildCount, HierarchyTag};
use crate::verify::{VERIFY_ENABLED, assert_child_pair, assert_parent_pair};

/// Makes `child` the first child of `parent`.
///
/// Null ids make this a no-op. The child must not already belong to this
/// hierarchy: re-parenting means calling
/// [`remove_child_from_top_level`](crate::remove_child_from_top_level) first.
///
/// # Panics
///
/// Always panics if `child` is already linked in this hierarchy, or if the
/// parent's counter cannot represent one more child. Both checks run before
/// any component is touched. With debug assertions, also panics if
/// `parent == child` or either entity is dead.
pub fn prepend_child_entity<Tag: HierarchyTag>(
    registry: &mut Registry,
    parent: Entity,
    child: Entity,
) {
    if parent.is_null() || child.is_null() {
        return;
    }
    debug_assert!(parent != child, "{parent:?} cannot be its own child");
    debug_assert!(registry.valid(parent), "{parent:?} is not a live entity");
    debug_assert!(registry.valid(child), "{child:?} is not a live entity");

    assert!(
        !registry.has::<ChildSiblings<Tag>>(child) && !registry.has::<ParentEntity<Tag>>(child),
        "{child:?} is already linked in {}",
        Tag::name()
    );
    if let Some(count) = registry.try_get::<TopLevelChildrenCount<Tag>>(parent) {
        assert!(
            count.size < <Tag::Size as ChildCount>::MAX,
            "children count of {parent:?} in {} cannot exceed {:?}",
            Tag::name(),
            <Tag::Size as ChildCount>::MAX
        );
    }

    link::<Tag>(registry, parent, child);
}

/// Fallible form of [`prepend_child_entity`].
///
/// Every precondition is reported as an error instead of a panic, and no
/// component is touched when one fails.
pub fn try_prepend_child_entity<Tag: HierarchyTag>(
    registry: &mut Registry,
    parent: Entity,
    child: Entity,
) -> Result<()> {
    let context = || {
        ErrorContext::new()
            .with_operation("try_prepend_child_entity")
            .with_hierarchy(Tag::name())
            .with_entity(parent)
            .with_entity(child)
    };

    if parent.is_null() || child.is_null() {
        return Err(Error::new(ErrorKind::NullEntity).with_context(context()));
    }
    if parent == child {
        return Err(Error::new(ErrorKind::SelfParent(parent)).with_context(context()));
    }
    registry
        .validate(parent)
        .and_then(|()| registry.validate(child))
        .map_err(|err| err.with_context(context()))?;

    if registry.has::<ParentEntity<Tag>>(child) || registry.has::<ChildSiblings<Tag>>(child) {
        return Err(Error::new(ErrorKind::AlreadyLinked {
            child,
            component: std::any::type_name::<ParentEntity<Tag>>(),
        })
        .with_context(context()));
    }
    if let Some(count) = registry.try_get::<TopLevelChildrenCount<Tag>>(parent) {
        if count.size >= <Tag::Size as ChildCount>::MAX {
            return Err(Error::new(ErrorKind::CountOverflow {
                parent,
                limit: <Tag::Size as ChildCount>::MAX.to_u64(),
            })
            .with_context(context()));
        }
    }

    link::<Tag>(registry, parent, child);
    Ok(())
}

/// Splices `child` in at the head of `parent`'s list.
///
/// Preconditions are checked by the callers.
fn link<Tag: HierarchyTag>(registry: &mut Registry, parent: Entity, child: Entity) {
    assert_parent_pair::<Tag>(registry, parent);

    let old_head = registry
        .try_get_mut::<FirstChildInLinkedList<Tag>>(parent)
        .map(|first| std::mem::replace(&mut first.first_id, child));

    match old_head {
        Some(old_head) => {
            let count = linked_mut::<TopLevelChildrenCount<Tag>>(registry, parent);
            let Some(size) = count.size.checked_increment() else {
                unreachable!("children count overflow is checked before linking");
            };
            count.size = size;

            let head = linked_mut::<ChildSiblings<Tag>>(registry, old_head);
            debug_assert!(head.prev_id.is_null(), "list head {old_head:?} has a prev");
            head.prev_id = child;
        }
        None => {
            attach(registry, parent, FirstChildInLinkedList::<Tag>::new(child));
            attach(
                registry,
                parent,
                TopLevelChildrenCount::<Tag>::new(<Tag::Size as ChildCount>::ONE),
            );
        }
    }

    attach(
        registry,
        child,
        ChildSiblings::<Tag>::new(NULL_ENTITY, old_head.unwrap_or(NULL_ENTITY)),
    );
    attach(registry, child, ParentEntity::<Tag>::new(parent));

    trace!(hierarchy = Tag::name(), ?parent, ?child, "linked child");

    if VERIFY_ENABLED {
        assert_parent_pair::<Tag>(registry, parent);
        assert_child_pair::<Tag>(registry, child);
        assert!(
            crate::predicates::is_child_at_top_level_of::<Tag>(registry, parent, child),
            "hierarchy corrupted: {child:?} not reachable from {parent:?} after linking"
        );
    }
}
