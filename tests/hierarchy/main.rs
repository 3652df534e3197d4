//! Integration tests for Layer 2: Hierarchy
//!
//! Tests for linking, unlinking, traversal, scoped views, bulk removal,
//! structural properties, and strand-bound use.

mod bulk;
mod scenarios;
mod strands;
mod views;

use lineage_foundation::Entity;
use lineage_hierarchy::{hierarchy_tag, prepend_child_entity};
use lineage_storage::Registry;

hierarchy_tag!(
    /// Scene graph used throughout these tests.
    pub Scene
);
hierarchy_tag!(
    /// Second hierarchy sharing entities with [`Scene`].
    pub Ui: u16
);

/// Creates a parent with `n` children, returned in insertion order.
pub fn family(registry: &mut Registry, n: usize) -> (Entity, Vec<Entity>) {
    let parent = registry.create();
    let kids: Vec<_> = (0..n).map(|_| registry.create()).collect();
    for kid in &kids {
        prepend_child_entity::<Scene>(registry, parent, *kid);
    }
    (parent, kids)
}
