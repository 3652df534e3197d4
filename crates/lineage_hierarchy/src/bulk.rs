//! Emptying many parents at once.

use std::marker::PhantomData;

use lineage_foundation::{Entity, NULL_ENTITY};
use lineage_storage::{ComponentSet, Exclude, Include, Registry};
use tracing::debug;

use crate::components::{FirstChildInLinkedList, TopLevelChildrenCount, attach};
use crate::predicates::{has_child_components, has_parent_components, is_child_at_top_level_of};
use crate::remove::{remove_child_components, remove_from_siblings, remove_parent_components};
use crate::tag::HierarchyTag;
use crate::verify::VERIFY_ENABLED;
use crate::view::view_top_level_children;

/// Marks children that phase one detached from their siblings.
struct ChildrenToRemove<Tag>(PhantomData<fn() -> Tag>);

/// Detaches every child of every parent matching the filter.
///
/// Parents are the entities carrying `FirstChildInLinkedList<Tag>` and all
/// of `I`, and none of `E`. Each ends with no children and no parent
/// components; each former child ends with no child components. No entity
/// is destroyed.
///
/// Runs in full passes so no live view is restructured while iterated:
/// unlink and mark every child, strip the marked children, strip the
/// parents, then verify.
pub fn remove_top_level_children_from_view<Tag, I, E>(
    registry: &mut Registry,
    include: Include<I>,
    exclude: Exclude<E>,
) where
    Tag: HierarchyTag,
    I: ComponentSet,
    E: ComponentSet,
{
    let parents = registry
        .view_filtered(include, exclude)
        .include::<(FirstChildInLinkedList<Tag>,)>()
        .entities();

    // Phase 1: splice every child out and mark it
    for &parent in &parents {
        debug_assert!(has_parent_components::<Tag>(registry, parent));

        let mut scoped = view_top_level_children::<Tag>(registry, parent);
        for child in scoped.entities() {
            let registry = scoped.registry_mut();
            debug_assert!(parent != child);
            debug_assert!(is_child_at_top_level_of::<Tag>(registry, parent, child));

            let spliced = remove_from_siblings::<Tag>(registry, child, child, NULL_ENTITY);
            debug_assert!(spliced, "{child:?} missing from the list of {parent:?}");

            attach(registry, child, ChildrenToRemove::<Tag>(PhantomData));
        }
    }

    // Phase 2: strip the marked children
    let children = registry.view::<(ChildrenToRemove<Tag>,)>().entities();
    for &child in &children {
        debug_assert!(has_child_components::<Tag>(registry, child));
        remove_child_components::<Tag>(registry, child);
    }
    registry.clear::<ChildrenToRemove<Tag>>();

    // Phase 3: strip the parents, whatever their count said
    for &parent in &parents {
        remove_parent_components::<Tag>(registry, parent);
    }

    // Phase 4
    if VERIFY_ENABLED {
        for &parent in &parents {
            assert!(
                !registry.has::<FirstChildInLinkedList<Tag>>(parent)
                    && !registry.has::<TopLevelChildrenCount<Tag>>(parent),
                "{parent:?} kept parent components after bulk removal"
            );
        }
    }

    debug!(
        hierarchy = Tag::name(),
        parents = parents.len(),
        children = children.len(),
        "removed children from view"
    );
}

pub use self::remove_top_level_children_from_view as remove_all_children_from_view;

/// Detaches every child of every parent in this hierarchy.
pub fn remove_all_top_level_children<Tag: HierarchyTag>(registry: &mut Registry) {
    remove_top_level_children_from_view::<Tag, (), ()>(
        registry,
        lineage_storage::include(),
        lineage_storage::exclude(),
    );
}

/// Returns the parents that [`remove_top_level_children_from_view`] would empty.
#[must_use]
pub fn parents_in_view<Tag, I, E>(
    registry: &Registry,
    include: Include<I>,
    exclude: Exclude<E>,
) -> Vec<Entity>
where
    Tag: HierarchyTag,
    I: ComponentSet,
    E: ComponentSet,
{
    registry
        .view_filtered(include, exclude)
        .include::<(FirstChildInLinkedList<Tag>,)>()
        .entities()
}
