//! Integration tests for bulk child removal
//!
//! Tests view-driven removal across many parents.

use lineage_hierarchy::{
    ChildSiblings, FirstChildInLinkedList, ParentEntity, TopLevelChildrenCount, is_parent_of,
    parents_in_view, prepend_child_entity, remove_all_top_level_children,
    remove_top_level_children_from_view, verify_parent,
};
use lineage_storage::{Registry, UnusedTag, exclude, include};

use crate::{Scene, Ui};

struct Level;

// =============================================================================
// Filtered Removal
// =============================================================================

#[test]
fn filter_matching_one_parent_empties_it() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 2);
    registry.emplace(p, Level).unwrap();

    remove_top_level_children_from_view::<Scene, _, _>(
        &mut registry,
        include::<(Level,)>(),
        exclude::<()>(),
    );

    for kid in &kids {
        assert!(!registry.has::<ParentEntity<Scene>>(*kid));
        assert!(!registry.has::<ChildSiblings<Scene>>(*kid));
    }
    assert!(!registry.has::<FirstChildInLinkedList<Scene>>(p));
    assert!(!registry.has::<TopLevelChildrenCount<Scene>>(p));
}

#[test]
fn excluded_parents_keep_their_children() {
    let mut registry = Registry::new();
    let (live, live_kids) = crate::family(&mut registry, 3);
    let (pooled, pooled_kids) = crate::family(&mut registry, 3);
    registry.emplace(pooled, UnusedTag).unwrap();

    assert_eq!(
        parents_in_view::<Scene, _, _>(&registry, include::<()>(), exclude::<(UnusedTag,)>()),
        vec![live]
    );
    remove_top_level_children_from_view::<Scene, _, _>(
        &mut registry,
        include::<()>(),
        exclude::<(UnusedTag,)>(),
    );

    assert!(live_kids.iter().all(|k| !registry.has::<ParentEntity<Scene>>(*k)));
    assert!(pooled_kids.iter().all(|k| is_parent_of::<Scene>(&registry, pooled, *k)));
    verify_parent::<Scene>(&registry, pooled).unwrap();
}

#[test]
fn removal_destroys_nothing() {
    let mut registry = Registry::new();
    for _ in 0..4 {
        crate::family(&mut registry, 5);
    }
    let before = registry.len();

    remove_all_top_level_children::<Scene>(&mut registry);

    assert_eq!(registry.len(), before);
    assert_eq!(registry.count::<ParentEntity<Scene>>(), 0);
    assert_eq!(registry.count::<FirstChildInLinkedList<Scene>>(), 0);
}

#[test]
fn removal_is_scoped_to_one_hierarchy() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 2);
    for kid in &kids {
        prepend_child_entity::<Ui>(&mut registry, p, *kid);
    }

    remove_all_top_level_children::<Scene>(&mut registry);

    assert_eq!(registry.count::<ParentEntity<Scene>>(), 0);
    assert_eq!(registry.count::<ParentEntity<Ui>>(), 2);
    verify_parent::<Ui>(&registry, p).unwrap();
}

#[test]
fn emptied_parents_can_be_refilled() {
    let mut registry = Registry::new();
    let (p, kids) = crate::family(&mut registry, 3);

    remove_all_top_level_children::<Scene>(&mut registry);
    for kid in &kids {
        prepend_child_entity::<Scene>(&mut registry, p, *kid);
    }

    assert_eq!(registry.get::<TopLevelChildrenCount<Scene>>(p).unwrap().size, 3);
    verify_parent::<Scene>(&registry, p).unwrap();
}
