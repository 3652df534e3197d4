//! Integration tests for hierarchies on a strand-bound registry
//!
//! Every mutation is posted to the owning strand; the caller only waits.

use std::sync::Arc;

use lineage_hierarchy::{
    prepend_child_entity, remove_all_top_level_children, top_level_children, verify_parent,
};
use lineage_storage::{RegistryConfig, SafeRegistry, Strand, StrandConfig};

use crate::Scene;

#[test]
fn posted_links_apply_in_order() {
    let strand = Strand::new(&StrandConfig::new().with_name("scene-strand")).unwrap();
    let shared =
        SafeRegistry::with_config(&strand, &RegistryConfig::new().with_verify_affinity(true))
            .into_shared();

    let parent = {
        let shared = Arc::clone(&shared);
        strand.invoke(move || shared.lock().create()).unwrap()
    };

    for _ in 0..10 {
        let shared = Arc::clone(&shared);
        strand
            .post(move || {
                let mut guard = shared.lock();
                let registry = guard.registry_mut();
                let child = registry.create();
                prepend_child_entity::<Scene>(registry, parent, child);
            })
            .unwrap();
    }

    let (count, consistent) = {
        let shared = Arc::clone(&shared);
        strand
            .invoke(move || {
                let guard = shared.lock();
                let registry = guard.registry();
                (
                    top_level_children::<Scene>(registry, parent).count(),
                    verify_parent::<Scene>(registry, parent).is_ok(),
                )
            })
            .unwrap()
    };
    assert_eq!(count, 10);
    assert!(consistent);

    {
        let shared = Arc::clone(&shared);
        strand
            .invoke(move || remove_all_top_level_children::<Scene>(shared.lock().registry_mut()))
            .unwrap();
    }
    strand.shutdown();

    let guard = shared.lock();
    assert_eq!(top_level_children::<Scene>(guard.registry_unchecked(), parent).count(), 0);
    assert_eq!(guard.registry_unchecked().len(), 11);
}
