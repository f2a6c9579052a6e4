//! Core domain logic for the product catalog.
//! Owns the product record, its SQLite persistence and the transactional
//! service callers go through.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::product::{Product, ProductId};
pub use repo::product_repo::{ProductRepository, RepoError, RepoResult, SqliteProductRepository};
pub use repo::{SqliteTransaction, TransactionMode, TransactionScope};
pub use service::product_service::{ProductService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
