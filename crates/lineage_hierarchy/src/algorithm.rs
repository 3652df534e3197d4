//! Registry-wide helpers: entity lookup and component whitelists.

use lineage_foundation::{Entity, NULL_ENTITY};
use lineage_storage::{ComponentSet, Exclude, Include, Registry};
use tracing::{trace, warn};

use crate::config::WhitelistPolicy;

/// Returns the first entity carrying all of `I` and none of `E`, or
/// [`NULL_ENTITY`].
///
/// "First" is whatever the registry's view yields first.
#[must_use]
pub fn find_entity<I: ComponentSet, E: ComponentSet>(
    registry: &Registry,
    include: Include<I>,
    exclude: Exclude<E>,
) -> Entity {
    registry
        .view_filtered(include, exclude)
        .first()
        .unwrap_or(NULL_ENTITY)
}

/// Counts components on `entity` that are not members of `I`, under the
/// default [`WhitelistPolicy`].
///
/// Meant to catch components leaking onto pooled entities.
///
/// # Panics
///
/// Panics on the first offending component when debug assertions are on.
pub fn check_components_whitelist<I: ComponentSet>(
    registry: &Registry,
    entity: Entity,
    include: Include<I>,
) -> usize {
    check_components_whitelist_with(registry, entity, include, WhitelistPolicy::default())
}

/// Counts components on `entity` that are not members of `I`.
///
/// # Panics
///
/// Panics on the first offending component under [`WhitelistPolicy::Panic`].
pub fn check_components_whitelist_with<I: ComponentSet>(
    registry: &Registry,
    entity: Entity,
    _include: Include<I>,
    policy: WhitelistPolicy,
) -> usize {
    let allowed = I::type_ids();
    let mut violations = 0;

    registry.visit(entity, |id| {
        let name = registry.type_name(id);
        if allowed.contains(&id) {
            trace!(?entity, component = name, "whitelisted component");
            return;
        }
        match policy {
            WhitelistPolicy::Panic => {
                panic!("{entity:?} is not allowed to carry component {name}")
            }
            WhitelistPolicy::Count => {
                warn!(?entity, component = name, "component outside whitelist");
                violations += 1;
            }
        }
    });

    violations
}

/// Runs [`check_components_whitelist`] only when debug assertions are on.
///
/// ```
/// use lineage_hierarchy::dcheck_component_whitelist;
/// use lineage_storage::{Registry, include};
///
/// struct Transform;
///
/// let mut registry = Registry::new();
/// let e = registry.create();
/// registry.emplace(e, Transform).unwrap();
/// dcheck_component_whitelist!(&registry, e, include::<(Transform,)>());
/// ```
#[macro_export]
macro_rules! dcheck_component_whitelist {
    ($registry:expr, $entity:expr, $include:expr $(,)?) => {
        if cfg!(debug_assertions) {
            let _ = $crate::check_components_whitelist($registry, $entity, $include);
        }
    };
}
