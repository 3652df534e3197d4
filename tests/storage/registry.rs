//! Integration tests for the registry
//!
//! Tests entity lifetimes, component attachment, and stale handle detection.

use lineage_foundation::{ErrorKind, NULL_ENTITY};
use lineage_storage::{Registry, RegistryConfig};

#[derive(Debug, PartialEq)]
struct Name(&'static str);

#[derive(Debug, PartialEq)]
struct Health(u32);

// =============================================================================
// Entity Lifetimes
// =============================================================================

#[test]
fn created_entities_are_valid_and_distinct() {
    let mut registry = Registry::with_config(&RegistryConfig::new().with_entity_capacity(16));
    let a = registry.create();
    let b = registry.create();

    assert!(registry.valid(a));
    assert!(registry.valid(b));
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
}

#[test]
fn destroy_strips_every_component() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.emplace(e, Name("crate")).unwrap();
    registry.emplace(e, Health(3)).unwrap();

    registry.destroy(e).unwrap();

    assert!(!registry.valid(e));
    assert_eq!(registry.count::<Name>(), 0);
    assert_eq!(registry.count::<Health>(), 0);
}

#[test]
fn recycled_slot_does_not_revive_stale_handle() {
    let mut registry = Registry::new();
    let old = registry.create();
    registry.emplace(old, Health(1)).unwrap();
    registry.destroy(old).unwrap();

    let new = registry.create();
    assert_eq!(old.slot(), new.slot());
    assert!(!registry.valid(old));
    assert!(!registry.has::<Health>(new));

    let err = registry.get::<Health>(old).unwrap_err();
    assert_eq!(err.kind, ErrorKind::StaleEntity(old));
}

#[test]
fn null_entity_is_never_valid() {
    let registry = Registry::new();
    assert!(!registry.valid(NULL_ENTITY));
    assert_eq!(
        registry.validate(NULL_ENTITY).unwrap_err().kind,
        ErrorKind::NullEntity
    );
}

// =============================================================================
// Components
// =============================================================================

#[test]
fn emplace_get_and_mutate() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.emplace(e, Health(10)).unwrap();

    registry.get_mut::<Health>(e).unwrap().0 -= 4;
    assert_eq!(registry.get::<Health>(e).unwrap(), &Health(6));
    assert_eq!(registry.try_get::<Name>(e), None);
}

#[test]
fn emplace_twice_is_rejected() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.emplace(e, Health(1)).unwrap();

    let err = registry.emplace(e, Health(2)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateComponent { .. }));
    assert_eq!(registry.get::<Health>(e).unwrap(), &Health(1));
}

#[test]
fn emplace_or_replace_returns_previous() {
    let mut registry = Registry::new();
    let e = registry.create();

    assert_eq!(registry.emplace_or_replace(e, Health(1)).unwrap(), None);
    assert_eq!(registry.emplace_or_replace(e, Health(2)).unwrap(), Some(Health(1)));
}

#[test]
fn remove_reports_missing_component() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.emplace(e, Name("x")).unwrap();

    assert_eq!(registry.remove::<Name>(e).unwrap(), Name("x"));
    assert!(matches!(
        registry.remove::<Name>(e).unwrap_err().kind,
        ErrorKind::ComponentNotFound { .. }
    ));
    assert_eq!(registry.remove_if_exists::<Name>(e), None);
}

#[test]
fn clear_detaches_type_everywhere() {
    let mut registry = Registry::new();
    let entities: Vec<_> = (0..5).map(|_| registry.create()).collect();
    for (i, e) in entities.iter().enumerate() {
        registry.emplace(*e, Health(u32::try_from(i).unwrap())).unwrap();
        registry.emplace(*e, Name("n")).unwrap();
    }

    registry.clear::<Health>();

    assert_eq!(registry.count::<Health>(), 0);
    assert_eq!(registry.count::<Name>(), 5);
    assert_eq!(registry.len(), 5);
}

// =============================================================================
// Type Names
// =============================================================================

#[test]
fn visit_reports_registered_names() {
    let mut registry = Registry::new();
    registry.register_type_name::<Health>("health");
    let e = registry.create();
    registry.emplace(e, Health(1)).unwrap();
    registry.emplace(e, Name("n")).unwrap();

    let mut names = Vec::new();
    registry.visit(e, |id| names.push(registry.type_name(id).to_string()));
    names.sort();

    assert_eq!(names.len(), 2);
    assert!(names.contains(&"health".to_string()));
    assert!(names.iter().any(|n| n.ends_with("Name")));
}
