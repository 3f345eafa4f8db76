//! The `ProductCatalog` trait and its error model.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pantry_core::{ProductId, TransportError};

use crate::product::{NewProduct, Product};

/// Failure modes of catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Applying the delta would drive stock negative. The stock changed
    /// between the caller's snapshot and this apply.
    #[error("stock changed concurrently for {product_id}: available {available}, requested {requested}")]
    StaleStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Applying the delta would overflow the quantity counter.
    #[error("quantity overflow for {product_id}: current {current}, delta {delta}")]
    Overflow {
        product_id: ProductId,
        current: i64,
        delta: i64,
    },

    /// A product with the same name already exists (case-sensitive check).
    #[error("product name already in use: {0}")]
    DuplicateName(String),

    /// The creation request was malformed.
    #[error("invalid product: {0}")]
    Invalid(String),

    /// The catalog backend could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(#[from] TransportError),
}

/// Result of one atomic stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub product_id: ProductId,
    pub old_quantity: i64,
    pub new_quantity: i64,
}

/// The Product Catalog collaborator.
///
/// Implementations must make `adjust` atomic per product: the read of the
/// current quantity and the write of the new one happen under one lock (or
/// one backend transaction), and a delta that would go negative is rejected
/// with `StaleStock` rather than applied.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Create a product; the catalog assigns the id. Names are unique,
    /// compared case-sensitively.
    async fn create_product(&self, request: NewProduct) -> Result<Product, CatalogError>;

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    async fn list(&self) -> Result<Vec<Product>, CatalogError>;

    /// Read current quantities for the given ids. Unknown ids are simply
    /// absent from the returned map.
    async fn snapshot(&self, ids: &[ProductId]) -> Result<HashMap<ProductId, i64>, CatalogError>;

    /// Atomically apply a signed delta to one product's quantity.
    async fn adjust(&self, id: &ProductId, delta: i64) -> Result<StockChange, CatalogError>;
}
