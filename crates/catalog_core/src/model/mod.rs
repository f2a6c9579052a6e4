//! Catalog domain model.
//!
//! # Responsibility
//! - Define the in-memory records that core services read and write.
//!
//! # Invariants
//! - Identity is owned by storage: records gain an id on first save only.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod product;
