//! A hierarchy's components as one associated group.

use std::marker::PhantomData;

use lineage_foundation::{Entity, Result};
use lineage_storage::{AssociatedComponents, Registry};
use tracing::trace;

use crate::predicates::{has_child_components, has_parent_components, parent_of};
use crate::remove::remove_child_from_top_level;
use crate::tag::HierarchyTag;
use crate::traverse::foreach_top_level_child;
use crate::verify::{verify_child, verify_parent};

/// Names an entity's membership in hierarchy `Tag` for the lifecycle hooks.
///
/// ```
/// use lineage_hierarchy::{TreeElement, hierarchy_tag, prepend_child_entity};
/// use lineage_storage::{Registry, remove_associated_components, validate_associated_components};
///
/// hierarchy_tag!(SceneTag);
///
/// let mut registry = Registry::new();
/// let root = registry.create();
/// let node = registry.create();
/// prepend_child_entity::<SceneTag>(&mut registry, root, node);
/// assert!(validate_associated_components::<TreeElement<SceneTag>>(&registry, node));
///
/// remove_associated_components::<TreeElement<SceneTag>>(&mut registry, node);
/// assert!(!validate_associated_components::<TreeElement<SceneTag>>(&registry, node));
/// ```
pub struct TreeElement<Tag: HierarchyTag>(PhantomData<fn() -> Tag>);

impl<Tag: HierarchyTag> AssociatedComponents for TreeElement<Tag> {
    /// Nothing to create: membership starts with
    /// [`prepend_child_entity`](crate::prepend_child_entity).
    fn populate(_registry: &mut Registry, _entity: Entity) -> Result<()> {
        Ok(())
    }

    /// Detaches `entity` from its parent and releases its own children.
    fn remove(registry: &mut Registry, entity: Entity) {
        if let Some(parent) = parent_of::<Tag>(registry, entity) {
            let detached = remove_child_from_top_level::<Tag>(registry, parent, entity);
            debug_assert!(detached, "{entity:?} not found under its parent {parent:?}");
        }

        let mut released = 0usize;
        if has_parent_components::<Tag>(registry, entity) {
            foreach_top_level_child::<Tag, _>(registry, entity, |registry, parent, child| {
                let detached = remove_child_from_top_level::<Tag>(registry, parent, child);
                debug_assert!(detached);
                released += 1;
            });
        }

        trace!(hierarchy = Tag::name(), ?entity, released, "left hierarchy");
    }

    /// True if `entity` is linked as a parent or a child and every link
    /// around it is consistent.
    fn validate(registry: &Registry, entity: Entity) -> bool {
        let member = has_child_components::<Tag>(registry, entity)
            || has_parent_components::<Tag>(registry, entity);
        member
            && verify_child::<Tag>(registry, entity).is_ok()
            && verify_parent::<Tag>(registry, entity).is_ok()
    }
}
