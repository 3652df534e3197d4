//! Core types for Lineage.
//!
//! This crate provides:
//! - [`Entity`] - Generational entity identifiers and the [`NULL_ENTITY`] sentinel
//! - [`Error`] - Error types with optional context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;

pub use entity::{Entity, NULL_ENTITY};
pub use error::{Error, ErrorContext, ErrorKind};

/// Result alias used across the Lineage crates.
pub type Result<T> = std::result::Result<T, Error>;
