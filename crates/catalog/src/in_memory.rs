//! In-memory catalog (dev/test backend).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pantry_core::ProductId;

use crate::catalog::{CatalogError, ProductCatalog, StockChange};
use crate::product::{NewProduct, Product};

/// In-memory `ProductCatalog` behind an `RwLock`.
///
/// Per-product writes are serialized by the lock, which is what makes
/// `adjust` atomic; the negative-stock re-check happens inside the same
/// critical section.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product with a caller-chosen id. Test convenience; production
    /// creation goes through `create_product`.
    pub fn seed(&self, product: Product) {
        let mut products = self.products.write().expect("catalog lock poisoned");
        products.insert(product.id.clone(), product);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn create_product(&self, request: NewProduct) -> Result<Product, CatalogError> {
        if request.name.trim().is_empty() {
            return Err(CatalogError::Invalid("name cannot be empty".to_string()));
        }
        if request.quantity < 0 {
            return Err(CatalogError::Invalid("initial quantity cannot be negative".to_string()));
        }

        let mut products = self.products.write().expect("catalog lock poisoned");
        if products.values().any(|p| p.name == request.name) {
            return Err(CatalogError::DuplicateName(request.name));
        }

        let product = Product {
            id: ProductId::generate(),
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
        };
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().expect("catalog lock poisoned");
        Ok(products.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().expect("catalog lock poisoned");
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn snapshot(&self, ids: &[ProductId]) -> Result<HashMap<ProductId, i64>, CatalogError> {
        let products = self.products.read().expect("catalog lock poisoned");
        Ok(ids
            .iter()
            .filter_map(|id| products.get(id).map(|p| (id.clone(), p.quantity)))
            .collect())
    }

    async fn adjust(&self, id: &ProductId, delta: i64) -> Result<StockChange, CatalogError> {
        let mut products = self.products.write().expect("catalog lock poisoned");
        let product = products
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        let old_quantity = product.quantity;
        let new_quantity = old_quantity
            .checked_add(delta)
            .ok_or_else(|| CatalogError::Overflow {
                product_id: id.clone(),
                current: old_quantity,
                delta,
            })?;
        if new_quantity < 0 {
            return Err(CatalogError::StaleStock {
                product_id: id.clone(),
                available: old_quantity,
                requested: -delta,
            });
        }

        product.quantity = new_quantity;
        Ok(StockChange {
            product_id: id.clone(),
            old_quantity,
            new_quantity,
        })
    }
}
