//! Integration tests for lifecycle tags
//!
//! Tests the construction markers and the not-constructed filter.

use lineage_storage::{
    DelayedConstruction, DelayedConstructionJustDone, NeedToDestroyTag, Registry, UnusedTag,
    exclude_not_constructed, include, populate_delayed_construction_components,
};

struct Body;

#[test]
fn not_constructed_filter_skips_every_lifecycle_tag() {
    let mut registry = Registry::new();
    let ready = registry.create();
    let pooled = registry.create();
    let dying = registry.create();
    let building = registry.create();
    for e in [ready, pooled, dying, building] {
        registry.emplace(e, Body).unwrap();
    }
    registry.emplace(pooled, UnusedTag).unwrap();
    registry.emplace(dying, NeedToDestroyTag).unwrap();
    populate_delayed_construction_components(&mut registry, building).unwrap();

    let live = registry
        .view_filtered(include::<(Body,)>(), exclude_not_constructed())
        .entities();
    assert_eq!(live, vec![ready]);
}

#[test]
fn finishing_construction_makes_entity_visible() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.emplace(e, Body).unwrap();
    populate_delayed_construction_components(&mut registry, e).unwrap();

    registry.remove::<DelayedConstruction>(e).unwrap();
    registry.emplace(e, DelayedConstructionJustDone).unwrap();

    let view = registry.view_filtered(include::<(Body,)>(), exclude_not_constructed());
    assert!(view.contains(e));

    // Pooling the entity again resets the markers
    populate_delayed_construction_components(&mut registry, e).unwrap();
    assert!(!registry.has::<DelayedConstructionJustDone>(e));
    assert!(!registry
        .view_filtered(include::<(Body,)>(), exclude_not_constructed())
        .contains(e));
}
