//! Configuration for hierarchy diagnostics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the component whitelist check does with an unexpected component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WhitelistPolicy {
    /// Panic on the first component outside the whitelist.
    Panic,
    /// Log each offending component and return how many there were.
    Count,
}

impl Default for WhitelistPolicy {
    /// `Panic` with debug assertions, `Count` without.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Count
        }
    }
}
