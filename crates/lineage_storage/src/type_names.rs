//! Debug names for component types.
//!
//! The registry owns one `TypeNames` table. Every component type gets its
//! Rust type name the first time a storage is created for it; applications
//! may register shorter names at startup.

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::collections::HashMap;

/// Name used when a type id was never seen by the registry.
pub const UNKNOWN_TYPE_NAME: &str = "<unknown component>";

/// Maps component type ids to human-readable names.
#[derive(Debug, Clone, Default)]
pub struct TypeNames {
    names: HashMap<TypeId, Cow<'static, str>>,
}

impl TypeNames {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name for `T`, replacing any previous name.
    pub fn register<T: 'static>(&mut self, name: impl Into<Cow<'static, str>>) {
        self.names.insert(TypeId::of::<T>(), name.into());
    }

    /// Records the Rust type name of `T` unless a name is already known.
    pub fn record<T: 'static>(&mut self) {
        self.names
            .entry(TypeId::of::<T>())
            .or_insert(Cow::Borrowed(type_name::<T>()));
    }

    /// Looks up the name registered for `id`.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&str> {
        self.names.get(&id).map(AsRef::as_ref)
    }

    /// Looks up the name for `id`, falling back to [`UNKNOWN_TYPE_NAME`].
    #[must_use]
    pub fn name_of(&self, id: TypeId) -> &str {
        self.get(id).unwrap_or(UNKNOWN_TYPE_NAME)
    }

    /// Returns the number of known types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no type is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
