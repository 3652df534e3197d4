//! Configuration for registries and strands.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`Registry`](crate::Registry) and the
/// [`SafeRegistry`](crate::SafeRegistry) wrapping it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Number of entity slots reserved up front.
    pub entity_capacity: usize,

    /// Whether `SafeRegistry` asserts that checked accesses run on its strand.
    ///
    /// On by default in debug builds only; release builds skip the check.
    pub verify_affinity: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 0,
            verify_affinity: cfg!(debug_assertions),
        }
    }
}

impl RegistryConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the reserved entity capacity.
    #[must_use]
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Builder method to enable/disable strand affinity checks.
    #[must_use]
    pub fn with_verify_affinity(mut self, verify: bool) -> Self {
        self.verify_affinity = verify;
        self
    }
}

/// Configuration for a [`Strand`](crate::Strand).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrandConfig {
    /// Name given to the worker thread.
    pub name: String,

    /// Maximum number of queued tasks; `None` for an unbounded queue.
    ///
    /// With a bound, `post` blocks while the queue is full.
    pub queue_capacity: Option<usize>,
}

impl Default for StrandConfig {
    fn default() -> Self {
        Self {
            name: "lineage-strand".to_string(),
            queue_capacity: None,
        }
    }
}

impl StrandConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the worker thread name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method to bound the task queue.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }
}
