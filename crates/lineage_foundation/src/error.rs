//! Error types for the Lineage crates.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entity::Entity;

/// The main error type for Lineage operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: Entity) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: Entity) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::DuplicateComponent { entity, component })
    }

    /// Creates a structural corruption error.
    #[must_use]
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Corrupted(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The null entity was passed where a live entity is required.
    #[error("null entity where a live entity is required")]
    NullEntity,

    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(Entity),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(Entity),

    /// Component not found on entity.
    #[error("component not found: {component} on entity {entity:?}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: Entity,
        /// The component type name.
        component: &'static str,
    },

    /// Component already present on entity.
    #[error("component already present: {component} on entity {entity:?}")]
    DuplicateComponent {
        /// The entity that already carries the component.
        entity: Entity,
        /// The component type name.
        component: &'static str,
    },

    /// An entity was asked to become its own child.
    #[error("entity {0:?} cannot be its own parent")]
    SelfParent(Entity),

    /// The child is already linked into the hierarchy.
    #[error("entity {child:?} already carries {component}")]
    AlreadyLinked {
        /// The child that is already part of the hierarchy.
        child: Entity,
        /// The relationship component it already carries.
        component: &'static str,
    },

    /// The children counter cannot represent one more child.
    #[error("children count of {parent:?} would exceed {limit}")]
    CountOverflow {
        /// The parent whose counter is saturated.
        parent: Entity,
        /// The maximum representable count.
        limit: u64,
    },

    /// A structural invariant of a hierarchy does not hold.
    #[error("hierarchy corrupted: {0}")]
    Corrupted(String),

    /// The strand no longer accepts tasks.
    #[error("strand closed: {0}")]
    StrandClosed(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Operation that failed.
    pub operation: Option<&'static str>,
    /// Name of the hierarchy tag involved, if any.
    pub hierarchy: Option<&'static str>,
    /// Entities involved in the failure, outermost first.
    pub path: Vec<Entity>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the hierarchy tag name.
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: &'static str) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Appends an entity involved in the failure.
    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.path.push(entity);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(hierarchy) = self.hierarchy {
            write!(f, " [{hierarchy}]")?;
        }
        if !self.path.is_empty() {
            write!(f, " involving")?;
            for entity in &self.path {
                write!(f, " {entity}")?;
            }
        }
        Ok(())
    }
}
