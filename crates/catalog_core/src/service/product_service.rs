//! Product use-case service.
//!
//! # Responsibility
//! - Provide list/read/create/update/delete entry points for core callers.
//! - Wrap each operation in a transaction scope of the right mode.
//!
//! # Invariants
//! - Reads run in `ReadOnly` scopes, mutations in `ReadWrite` scopes.
//! - A failing operation leaves storage unchanged (scope dropped uncommitted).
//! - Every missing-id failure surfaces as `ServiceError::NotFound(id)`.

use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{ProductRepository, RepoError};
use crate::repo::{TransactionMode, TransactionScope};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for product use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No product is stored under the requested id.
    NotFound(ProductId),
    /// Persistence-layer failure, passed through untranslated.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Transactional facade over a product repository.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every stored product, ordered by id.
    pub fn list_all(&self) -> ServiceResult<Vec<Product>> {
        self.in_scope("list", TransactionMode::ReadOnly, |repo| {
            Ok(repo.find_all()?)
        })
    }

    /// Gets one product by id.
    ///
    /// # Errors
    /// - `ServiceError::NotFound(id)` when no row matches.
    pub fn find_by_id(&self, id: ProductId) -> ServiceResult<Product> {
        self.in_scope("find", TransactionMode::ReadOnly, |repo| {
            load_existing(repo, id)
        })
    }

    /// Persists a new product and returns it with its assigned id.
    ///
    /// Any id carried by `product` is discarded; storage always assigns one.
    pub fn create(&self, product: &Product) -> ServiceResult<Product> {
        let fresh = product.clone().without_id();
        self.in_scope("create", TransactionMode::ReadWrite, |repo| {
            Ok(repo.save(&fresh)?)
        })
    }

    /// Replaces name, price, description and stock of an existing product.
    ///
    /// # Contract
    /// - Full overwrite: every field of `changes` is copied, even defaults.
    /// - `changes.id()` is ignored; the stored id is kept.
    /// - Returns the stored record after the write.
    pub fn update(&self, id: ProductId, changes: &Product) -> ServiceResult<Product> {
        self.in_scope("update", TransactionMode::ReadWrite, |repo| {
            let mut product = load_existing(repo, id)?;
            product.overwrite_from(changes);
            Ok(repo.save(&product)?)
        })
    }

    /// Removes an existing product.
    pub fn delete(&self, id: ProductId) -> ServiceResult<()> {
        self.in_scope("delete", TransactionMode::ReadWrite, |repo| {
            let product = load_existing(repo, id)?;
            repo.delete(&product)?;
            Ok(())
        })
    }

    fn in_scope<T>(
        &self,
        op: &'static str,
        mode: TransactionMode,
        body: impl FnOnce(&R) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        let result = self.repo.begin(mode).map_err(ServiceError::from).and_then(|tx| {
            let value = body(&self.repo)?;
            tx.commit()?;
            Ok(value)
        });

        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) if mode == TransactionMode::ReadOnly => debug!(
                "event=product_{op} module=service status=ok mode={} duration_ms={duration_ms}",
                mode.as_str()
            ),
            Ok(_) => info!(
                "event=product_{op} module=service status=ok mode={} duration_ms={duration_ms}",
                mode.as_str()
            ),
            Err(ServiceError::NotFound(id)) => info!(
                "event=product_{op} module=service status=not_found id={id} duration_ms={duration_ms}"
            ),
            Err(err) => warn!(
                "event=product_{op} module=service status=error mode={} duration_ms={duration_ms} error={err}",
                mode.as_str()
            ),
        }

        result
    }
}

fn load_existing<R: ProductRepository>(repo: &R, id: ProductId) -> ServiceResult<Product> {
    repo.find_by_id(id)?.ok_or(ServiceError::NotFound(id))
}
