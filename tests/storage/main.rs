//! Integration tests for Layer 1: Storage
//!
//! Tests for the registry, filtered views, lifecycle tags, and strands.

mod lifecycle;
mod registry;
