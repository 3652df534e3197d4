//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Entity, the null sentinel, and Error.

mod entities;
