//! Integration tests for single-parent linking and unlinking
//!
//! Walks one parent through insertion and removal, checking every link.

use lineage_foundation::{ErrorKind, NULL_ENTITY};
use lineage_hierarchy::{
    ChildSiblings, FirstChildInLinkedList, ParentEntity, TopLevelChildrenCount,
    is_parent_of, parent_of, prepend_child_entity, remove_child_entity,
    remove_child_from_top_level, top_level_children, try_prepend_child_entity, verify_child,
    verify_parent,
};
use lineage_storage::Registry;

use crate::{Scene, Ui};

fn siblings(registry: &Registry, e: lineage_foundation::Entity) -> &ChildSiblings<Scene> {
    registry.get::<ChildSiblings<Scene>>(e).unwrap()
}

fn head(registry: &Registry, p: lineage_foundation::Entity) -> lineage_foundation::Entity {
    registry.get::<FirstChildInLinkedList<Scene>>(p).unwrap().first_id
}

fn size(registry: &Registry, p: lineage_foundation::Entity) -> usize {
    registry.get::<TopLevelChildrenCount<Scene>>(p).unwrap().size
}

// =============================================================================
// Insert and Remove Walkthrough
// =============================================================================

#[test]
fn first_child_becomes_head() {
    let mut registry = Registry::new();
    let p = registry.create();
    let c1 = registry.create();

    prepend_child_entity::<Scene>(&mut registry, p, c1);

    assert_eq!(size(&registry, p), 1);
    assert_eq!(head(&registry, p), c1);
    assert_eq!(*siblings(&registry, c1), ChildSiblings::detached());
    assert_eq!(registry.get::<ParentEntity<Scene>>(c1).unwrap().parent_id, p);
}

#[test]
fn second_child_is_prepended() {
    let mut registry = Registry::new();
    let p = registry.create();
    let c1 = registry.create();
    let c2 = registry.create();
    prepend_child_entity::<Scene>(&mut registry, p, c1);

    prepend_child_entity::<Scene>(&mut registry, p, c2);

    assert_eq!(head(&registry, p), c2);
    assert_eq!(siblings(&registry, c2).next_id, c1);
    assert_eq!(siblings(&registry, c2).prev_id, NULL_ENTITY);
    assert_eq!(siblings(&registry, c1).prev_id, c2);
    assert_eq!(size(&registry, p), 2);
}

#[test]
fn removing_head_promotes_next() {
    let mut registry = Registry::new();
    let p = registry.create();
    let c1 = registry.create();
    let c2 = registry.create();
    prepend_child_entity::<Scene>(&mut registry, p, c1);
    prepend_child_entity::<Scene>(&mut registry, p, c2);

    assert!(remove_child_from_top_level::<Scene>(&mut registry, p, c2));

    assert_eq!(head(&registry, p), c1);
    assert_eq!(siblings(&registry, c1).prev_id, NULL_ENTITY);
    assert_eq!(size(&registry, p), 1);
    assert!(!registry.has::<ParentEntity<Scene>>(c2));
    assert!(!registry.has::<ChildSiblings<Scene>>(c2));
}

#[test]
fn removing_last_child_strips_parent() {
    let mut registry = Registry::new();
    let p = registry.create();
    let c1 = registry.create();
    let c2 = registry.create();
    prepend_child_entity::<Scene>(&mut registry, p, c1);
    prepend_child_entity::<Scene>(&mut registry, p, c2);
    assert!(remove_child_from_top_level::<Scene>(&mut registry, p, c2));

    assert!(remove_child_entity::<Scene>(&mut registry, p, c1));

    assert!(!registry.has::<FirstChildInLinkedList<Scene>>(p));
    assert!(!registry.has::<TopLevelChildrenCount<Scene>>(p));
    assert!(registry.valid(p) && registry.valid(c1) && registry.valid(c2));
}

#[test]
fn removing_a_stranger_changes_nothing() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 2);
    let c3 = registry.create();

    assert!(!remove_child_from_top_level::<Scene>(&mut registry, p, c3));

    assert_eq!(size(&registry, p), 2);
    assert_eq!(head(&registry, p), kids[1]);
    assert!(!registry.has::<ParentEntity<Scene>>(c3));
    assert!(!registry.has::<ChildSiblings<Scene>>(c3));
    verify_parent::<Scene>(&registry, p).unwrap();
}

#[test]
fn removing_from_the_middle_relinks_neighbours() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 3);
    // List is kids[2], kids[1], kids[0]

    assert!(remove_child_from_top_level::<Scene>(&mut registry, p, kids[1]));

    assert_eq!(siblings(&registry, kids[2]).next_id, kids[0]);
    assert_eq!(siblings(&registry, kids[0]).prev_id, kids[2]);
    assert_eq!(
        top_level_children::<Scene>(&registry, p).collect::<Vec<_>>(),
        vec![kids[2], kids[0]]
    );
    verify_parent::<Scene>(&registry, p).unwrap();
}

#[test]
fn child_of_another_parent_is_not_removed() {
    let mut registry = Registry::new();
    let (p1, kids1) = crate::family(&mut registry, 1);
    let (p2, _) = crate::family(&mut registry, 1);

    assert!(!remove_child_from_top_level::<Scene>(&mut registry, p2, kids1[0]));
    assert_eq!(parent_of::<Scene>(&registry, kids1[0]), Some(p1));
}

// =============================================================================
// Fallible Insertion
// =============================================================================

#[test]
fn try_prepend_reports_each_precondition() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 1);
    let dead = registry.create();
    registry.destroy(dead).unwrap();

    let kind = |result: lineage_foundation::Result<()>| result.unwrap_err().kind;

    assert_eq!(
        kind(try_prepend_child_entity::<Scene>(&mut registry, NULL_ENTITY, kids[0])),
        ErrorKind::NullEntity
    );
    assert_eq!(
        kind(try_prepend_child_entity::<Scene>(&mut registry, p, p)),
        ErrorKind::SelfParent(p)
    );
    assert!(matches!(
        kind(try_prepend_child_entity::<Scene>(&mut registry, p, dead)),
        ErrorKind::StaleEntity(_) | ErrorKind::EntityNotFound(_)
    ));
    assert!(matches!(
        kind(try_prepend_child_entity::<Scene>(&mut registry, p, kids[0])),
        ErrorKind::AlreadyLinked { .. }
    ));
    assert_eq!(size(&registry, p), 1);
}

#[test]
fn try_prepend_errors_carry_context() {
    let mut registry = Registry::new();
    let p = registry.create();

    let err = try_prepend_child_entity::<Scene>(&mut registry, p, p).unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.operation, Some("try_prepend_child_entity"));
    assert!(context.hierarchy.unwrap().ends_with("Scene"));
    assert_eq!(context.path, vec![p, p]);

    // Parent first, then the child that could not be linked
    let (other, kids) = crate::family(&mut registry, 1);
    let err = try_prepend_child_entity::<Scene>(&mut registry, p, kids[0]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyLinked { child, .. } if child == kids[0]));
    assert_eq!(err.context.unwrap().path, vec![p, kids[0]]);
    assert!(is_parent_of::<Scene>(&registry, other, kids[0]));
}

// =============================================================================
// Independent Hierarchies
// =============================================================================

#[test]
fn one_entity_can_sit_in_two_hierarchies() {
    let mut registry = Registry::new();
    let (scene_parent, kids) = crate::family(&mut registry, 2);
    let ui_parent = registry.create();
    prepend_child_entity::<Ui>(&mut registry, ui_parent, kids[0]);

    assert!(is_parent_of::<Scene>(&registry, scene_parent, kids[0]));
    assert!(is_parent_of::<Ui>(&registry, ui_parent, kids[0]));
    assert!(!is_parent_of::<Ui>(&registry, scene_parent, kids[0]));

    assert!(remove_child_from_top_level::<Scene>(&mut registry, scene_parent, kids[0]));
    verify_child::<Ui>(&registry, kids[0]).unwrap();
    assert_eq!(
        registry.get::<TopLevelChildrenCount<Ui>>(ui_parent).unwrap().size,
        1u16
    );
}

#[test]
#[should_panic(expected = "already linked")]
fn prepend_rejects_linked_child() {
    let mut registry = Registry::new();
    let (_, kids) = crate::family(&mut registry, 1);
    let other = registry.create();

    prepend_child_entity::<Scene>(&mut registry, other, kids[0]);
}
