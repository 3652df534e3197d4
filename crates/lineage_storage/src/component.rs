//! Component typing and type-level component filters.
//!
//! Any `Send + 'static` type can be attached to an entity. Filters for views
//! are tuples of component types (`()`, `(A,)`, `(A, B)`, ...) wrapped in the
//! zero-sized [`Include`] and [`Exclude`] markers.

use std::any::{TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;

/// Marker trait for values storable in the registry.
///
/// Implemented for every `Send + 'static` type, so plain structs and
/// zero-sized tags need no extra ceremony.
pub trait Component: Send + 'static {}

impl<T: Send + 'static> Component for T {}

/// A compile-time set of component types used to filter views.
pub trait ComponentSet: 'static {
    /// Returns the `TypeId` of every member.
    fn type_ids() -> Vec<TypeId>;

    /// Returns the Rust type name of every member.
    fn type_names() -> Vec<&'static str>;
}

impl ComponentSet for () {
    fn type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    fn type_names() -> Vec<&'static str> {
        Vec::new()
    }
}

macro_rules! impl_component_set {
    ($($member:ident),+) => {
        impl<$($member: Component),+> ComponentSet for ($($member,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$member>()),+]
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(type_name::<$member>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// Components an entity must carry to match a view.
pub struct Include<T: ComponentSet>(PhantomData<fn() -> T>);

/// Components an entity must not carry to match a view.
pub struct Exclude<T: ComponentSet>(PhantomData<fn() -> T>);

/// Builds an [`Include`] filter.
///
/// ```
/// use lineage_storage::{Registry, include, exclude};
///
/// struct Visible;
/// struct Hidden;
///
/// let mut registry = Registry::new();
/// let e = registry.create();
/// registry.emplace(e, Visible).unwrap();
///
/// let view = registry.view_filtered(include::<(Visible,)>(), exclude::<(Hidden,)>());
/// assert_eq!(view.entities(), vec![e]);
/// ```
#[must_use]
pub const fn include<T: ComponentSet>() -> Include<T> {
    Include(PhantomData)
}

/// Builds an [`Exclude`] filter.
#[must_use]
pub const fn exclude<T: ComponentSet>() -> Exclude<T> {
    Exclude(PhantomData)
}

macro_rules! impl_filter_marker {
    ($marker:ident) => {
        impl<T: ComponentSet> Clone for $marker<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T: ComponentSet> Copy for $marker<T> {}

        impl<T: ComponentSet> Default for $marker<T> {
            fn default() -> Self {
                Self(PhantomData)
            }
        }

        impl<T: ComponentSet> fmt::Debug for $marker<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($marker))
                    .field(&T::type_names())
                    .finish()
            }
        }
    };
}

impl_filter_marker!(Include);
impl_filter_marker!(Exclude);
