//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence contract the service layer talks to.
//! - Isolate SQLite query and transaction details from service code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Unpersisted`) in
//!   addition to DB transport errors.
//! - Every scope opened through `begin` rolls back unless committed.

pub mod product_repo;
mod transaction;

pub use transaction::{SqliteTransaction, TransactionMode, TransactionScope};
