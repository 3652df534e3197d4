//! Intrusive parent/child hierarchies for Lineage.
//!
//! A hierarchy is identified by a tag type and lives entirely in registry
//! components: a parent carries the head of a doubly-linked sibling list and
//! a child counter, and each child carries its parent id and sibling links.
//! Any number of independent hierarchies can coexist on the same entities.
//!
//! This crate provides:
//! - [`HierarchyTag`] and [`hierarchy_tag!`] - Hierarchy identity and counter width
//! - [`prepend_child_entity`] / [`remove_child_from_top_level`] - Linking and unlinking
//! - [`foreach_top_level_child`] and [`top_level_children`] - Walking direct children
//! - [`view_top_level_children`] - A scoped snapshot that survives restructuring
//! - [`remove_top_level_children_from_view`] - Emptying many parents at once
//! - [`verify_parent`] / [`verify_child`] - Structural consistency checks
//! - [`TreeElement`] - Hierarchy membership as an associated component group
//!
//! ```
//! use lineage_hierarchy::{
//!     hierarchy_tag, is_parent_of, prepend_child_entity, remove_child_from_top_level,
//!     top_level_children,
//! };
//! use lineage_storage::Registry;
//!
//! hierarchy_tag!(SceneTag);
//!
//! let mut registry = Registry::new();
//! let root = registry.create();
//! let a = registry.create();
//! let b = registry.create();
//!
//! prepend_child_entity::<SceneTag>(&mut registry, root, a);
//! prepend_child_entity::<SceneTag>(&mut registry, root, b);
//! assert!(is_parent_of::<SceneTag>(&registry, root, a));
//! assert_eq!(top_level_children::<SceneTag>(&registry, root).collect::<Vec<_>>(), [b, a]);
//!
//! assert!(remove_child_from_top_level::<SceneTag>(&mut registry, root, b));
//! assert_eq!(top_level_children::<SceneTag>(&registry, root).collect::<Vec<_>>(), [a]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithm;
pub mod bulk;
pub mod components;
pub mod config;
pub mod insert;
pub mod lifetime;
pub mod predicates;
pub mod remove;
pub mod tag;
pub mod traverse;
pub mod verify;
pub mod view;

pub use algorithm::{check_components_whitelist, check_components_whitelist_with, find_entity};
pub use bulk::{
    parents_in_view, remove_all_children_from_view, remove_all_top_level_children,
    remove_top_level_children_from_view,
};
pub use components::{
    ChildLinkedList, ChildLinkedListSize, ChildSiblings, FirstChildInLinkedList, ParentEntity,
    TopLevelChildrenCount,
};
pub use config::WhitelistPolicy;
pub use insert::{prepend_child_entity, try_prepend_child_entity};
pub use lifetime::TreeElement;
pub use predicates::{
    has_child_at_top_level, has_child_components, has_child_in_linked_list,
    has_parent_components, is_child_at_top_level_of, is_child_of, is_parent_at_top_level_of,
    is_parent_of, parent_of, top_level_children_count,
};
pub use remove::{
    remove_child_components, remove_child_entity, remove_child_from_top_level,
    remove_child_links, remove_from_siblings, remove_parent_components,
};
pub use tag::{ChildCount, HierarchyTag};
pub use traverse::{TopLevelChildren, foreach_child_entity, foreach_top_level_child, top_level_children};
pub use verify::{VERIFY_ENABLED, verify_child, verify_parent};
pub use view::{ChildrenToView, ScopedChildView, view_child_entities, view_top_level_children};
