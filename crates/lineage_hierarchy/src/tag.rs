//! Hierarchy tags and child counters.
//!
//! A tag is a type that is never instantiated. It only selects which of
//! several independent hierarchies a relationship component belongs to, so
//! the same entity can sit in a scene graph and a widget tree at once.

use std::fmt::Debug;

/// Unsigned integer usable as a children counter.
pub trait ChildCount: Copy + Eq + Ord + Debug + Send + Sync + 'static {
    /// The count of a list holding exactly one child.
    const ONE: Self;
    /// The largest representable count.
    const MAX: Self;

    /// Adds one, or `None` on overflow.
    fn checked_increment(self) -> Option<Self>;

    /// Subtracts one, or `None` below zero.
    fn checked_decrement(self) -> Option<Self>;

    /// Returns true for a count of zero.
    fn is_zero(self) -> bool;

    /// Widens the count for diagnostics.
    fn to_u64(self) -> u64;
}

macro_rules! impl_child_count {
    ($($int:ty),+) => {
        $(
            impl ChildCount for $int {
                const ONE: Self = 1;
                const MAX: Self = <$int>::MAX;

                fn checked_increment(self) -> Option<Self> {
                    self.checked_add(1)
                }

                fn checked_decrement(self) -> Option<Self> {
                    self.checked_sub(1)
                }

                fn is_zero(self) -> bool {
                    self == 0
                }

                #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
                fn to_u64(self) -> u64 {
                    self as u64
                }
            }
        )+
    };
}

impl_child_count!(u8, u16, u32, u64, usize);

/// Selects one independent hierarchy.
///
/// Use [`hierarchy_tag!`](crate::hierarchy_tag) to declare one.
pub trait HierarchyTag: 'static {
    /// Integer type of this hierarchy's children counter.
    type Size: ChildCount;

    /// Name used in logs and errors.
    #[must_use]
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Declares an uninhabited hierarchy tag type.
///
/// The counter type defaults to `usize`.
///
/// ```
/// use lineage_hierarchy::{ChildCount, HierarchyTag, hierarchy_tag};
///
/// hierarchy_tag!(
///     /// Scene graph.
///     pub SceneTag
/// );
/// hierarchy_tag!(pub MenuTag: u8);
///
/// assert_eq!(<<MenuTag as HierarchyTag>::Size as ChildCount>::MAX, 255);
/// ```
#[macro_export]
macro_rules! hierarchy_tag {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $crate::hierarchy_tag!($(#[$meta])* $vis $name: usize);
    };
    ($(#[$meta:meta])* $vis:vis $name:ident : $size:ty) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::HierarchyTag for $name {
            type Size = $size;
        }
    };
}
