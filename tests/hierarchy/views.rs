//! Integration tests for traversal and scoped child views
//!
//! Tests restructuring a family while walking it.

use lineage_hierarchy::{
    ChildrenToView, FirstChildInLinkedList, ParentEntity, foreach_top_level_child,
    prepend_child_entity, remove_child_from_top_level, top_level_children,
    view_top_level_children,
};
use lineage_storage::Registry;

use crate::Scene;

// =============================================================================
// Visitor Traversal
// =============================================================================

#[test]
fn visitor_can_move_children_to_another_parent() {
    let mut registry = Registry::new();
    let (old, kids) = crate::family(&mut registry, 4);
    let new = registry.create();

    foreach_top_level_child::<Scene, _>(&mut registry, old, |registry, parent, child| {
        assert!(remove_child_from_top_level::<Scene>(registry, parent, child));
        prepend_child_entity::<Scene>(registry, new, child);
    });

    assert!(!registry.has::<FirstChildInLinkedList<Scene>>(old));
    // Moving reverses the order a second time
    assert_eq!(top_level_children::<Scene>(&registry, new).collect::<Vec<_>>(), kids);
}

#[test]
fn visitor_may_read_predicates_reentrantly() {
    let mut registry = Registry::new();
    let (p, _) = crate::family(&mut registry, 3);

    let mut positions = Vec::new();
    foreach_top_level_child::<Scene, _>(&mut registry, p, |registry, parent, child| {
        let index = top_level_children::<Scene>(registry, parent)
            .position(|c| c == child)
            .unwrap();
        positions.push(index);
    });

    assert_eq!(positions, vec![0, 1, 2]);
}

// =============================================================================
// Scoped Views
// =============================================================================

#[test]
fn scoped_view_survives_destroying_children() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 3);

    {
        let mut scoped = view_top_level_children::<Scene>(&mut registry, p);
        for child in scoped.entities() {
            assert!(remove_child_from_top_level::<Scene>(&mut scoped, p, child));
            scoped.destroy(child).unwrap();
        }
        assert!(scoped.is_empty());
    }

    assert!(kids.iter().all(|k| !registry.valid(*k)));
    assert!(!registry.has::<FirstChildInLinkedList<Scene>>(p));
    assert_eq!(registry.count::<ChildrenToView<Scene>>(), 0);
}

#[test]
fn scoped_view_leaves_grandchildren_alone() {
    let mut registry = Registry::new();
    let (root, mids) = crate::family(&mut registry, 2);
    let leaf = registry.create();
    prepend_child_entity::<Scene>(&mut registry, mids[0], leaf);

    let captured = {
        let scoped = view_top_level_children::<Scene>(&mut registry, root);
        let mut captured = scoped.entities();
        captured.sort();
        captured
    };

    assert_eq!(captured, mids);
    assert_eq!(registry.get::<ParentEntity<Scene>>(leaf).unwrap().parent_id, mids[0]);
    assert!(!registry.has::<ChildrenToView<Scene>>(leaf));
}
