//! Integration tests for entity identifiers
//!
//! Tests the null sentinel, ordering, and formatting.

use lineage_foundation::{Entity, NULL_ENTITY};

// =============================================================================
// Null Sentinel
// =============================================================================

#[test]
fn null_entity_is_null() {
    assert!(NULL_ENTITY.is_null());
    assert!(Entity::null().is_null());
    assert_eq!(Entity::default(), NULL_ENTITY);
}

#[test]
fn allocated_style_ids_are_not_null() {
    assert!(!Entity::new(0, 1).is_null());
    assert!(!Entity::new(u32::MAX - 1, 7).is_null());
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn generation_distinguishes_handles() {
    let old = Entity::new(3, 1);
    let new = Entity::new(3, 3);

    assert_ne!(old, new);
    assert_eq!(old.slot(), new.slot());
}

#[test]
fn entities_sort_by_index_then_generation() {
    let mut ids = vec![Entity::new(2, 1), Entity::new(1, 3), Entity::new(1, 1)];
    ids.sort();
    assert_eq!(ids, vec![Entity::new(1, 1), Entity::new(1, 3), Entity::new(2, 1)]);
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn debug_shows_generation() {
    assert_eq!(format!("{:?}", Entity::new(4, 9)), "Entity(4v9)");
    assert_eq!(format!("{NULL_ENTITY:?}"), "Entity(null)");
}

#[test]
fn display_shows_index_only() {
    assert_eq!(Entity::new(4, 9).to_string(), "4");
    assert_eq!(NULL_ENTITY.to_string(), "null");
}
