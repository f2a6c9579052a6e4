//! Product domain model.
//!
//! # Responsibility
//! - Define the canonical catalog entry shared by repository and service.
//! - Keep identity read-only for callers outside core.
//!
//! # Invariants
//! - `id` is `None` until the repository persists the record.
//! - Once assigned, `id` never changes for the lifetime of the row.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a product row.
pub type ProductId = i64;

/// One catalog entry.
///
/// Fields other than `id` are freely writable. Identity is only assigned by
/// the repository layer on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    id: Option<ProductId>,
    /// Display label. Not unique.
    pub name: String,
    /// Integer monetary amount; currency is decided by the caller.
    pub price: i64,
    /// Optional free-form text.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional on-hand count. Negative values are stored as given.
    #[serde(default)]
    pub stock_quantity: Option<i32>,
}

impl Product {
    /// Creates an unsaved product. `id` stays unset.
    pub fn new(
        name: impl Into<String>,
        price: i64,
        description: Option<String>,
        stock_quantity: Option<i32>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            description,
            stock_quantity,
        }
    }

    /// Returns the storage id, or `None` for a record not yet saved.
    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    /// Returns whether this record has been persisted.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces every mutable field with the values from `source`.
    ///
    /// Full-overwrite semantics: empty or default values in `source` are
    /// copied as well. `id` is left untouched.
    pub fn overwrite_from(&mut self, source: &Product) {
        self.name.clone_from(&source.name);
        self.price = source.price;
        self.description.clone_from(&source.description);
        self.stock_quantity = source.stock_quantity;
    }

    pub(crate) fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}
