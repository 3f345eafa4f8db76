//! Movement executor: applies validated deltas to the catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use pantry_catalog::{CatalogError, ProductCatalog};
use pantry_core::{ProductId, TransportError};
use pantry_movements::StockMovement;

/// Per-line execution failure. Deterministic; sibling lines are unaffected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Stock changed between the validation snapshot and this apply; the
    /// line is failed instead of letting the quantity go negative.
    #[error("stock changed concurrently for {product_id} (available {available}, requested {requested})")]
    ConcurrentModification {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The delta would overflow the product's quantity counter.
    #[error("quantity overflow for {product_id} (current {current}, delta {delta})")]
    QuantityOverflow {
        product_id: ProductId,
        current: i64,
        delta: i64,
    },
}

impl ExecutionError {
    pub fn code(&self) -> &'static str {
        match self {
            ExecutionError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            ExecutionError::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            ExecutionError::QuantityOverflow { .. } => "QUANTITY_OVERFLOW",
        }
    }
}

/// Result of applying one movement line, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOutcome {
    pub product_id: ProductId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LineOutcome {
    pub fn applied(product_id: ProductId, old_quantity: i64, new_quantity: i64) -> Self {
        Self {
            product_id,
            success: true,
            old_quantity: Some(old_quantity),
            new_quantity: Some(new_quantity),
            error: None,
        }
    }

    pub fn failed(product_id: ProductId, error: &ExecutionError) -> Self {
        Self {
            product_id,
            success: false,
            old_quantity: None,
            new_quantity: None,
            error: Some(format!("{}: {}", error.code(), error)),
        }
    }
}

/// Applies a validated movement to the catalog, line by line.
///
/// The catalog has no atomic multi-document batch, so lines are applied
/// independently and partial success is an explicit, first-class result:
/// one failed line neither aborts nor rolls back its siblings. Transport
/// failures are different: they abort the whole batch call so the retry
/// wrapper can resubmit it.
#[derive(Debug, Clone)]
pub struct MovementExecutor<C> {
    catalog: Arc<C>,
}

impl<C: ProductCatalog> MovementExecutor<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Apply every line of `movement`, returning per-line outcomes in input
    /// order. `Err` is reserved for transport-level failures.
    pub async fn execute(&self, movement: &StockMovement) -> Result<Vec<LineOutcome>, TransportError> {
        let mut outcomes = Vec::with_capacity(movement.lines.len());

        for line in &movement.lines {
            let delta = movement.delta_for(line);
            match self.catalog.adjust(&line.product_id, delta).await {
                Ok(change) => {
                    debug!(
                        product_id = %change.product_id,
                        old = change.old_quantity,
                        new = change.new_quantity,
                        "applied movement line"
                    );
                    outcomes.push(LineOutcome::applied(
                        change.product_id,
                        change.old_quantity,
                        change.new_quantity,
                    ));
                }
                Err(CatalogError::NotFound(product_id)) => {
                    let err = ExecutionError::ProductNotFound(product_id.clone());
                    outcomes.push(LineOutcome::failed(product_id, &err));
                }
                Err(CatalogError::StaleStock {
                    product_id,
                    available,
                    requested,
                }) => {
                    let err = ExecutionError::ConcurrentModification {
                        product_id: product_id.clone(),
                        available,
                        requested,
                    };
                    outcomes.push(LineOutcome::failed(product_id, &err));
                }
                Err(CatalogError::Overflow {
                    product_id,
                    current,
                    delta,
                }) => {
                    let err = ExecutionError::QuantityOverflow {
                        product_id: product_id.clone(),
                        current,
                        delta,
                    };
                    outcomes.push(LineOutcome::failed(product_id, &err));
                }
                Err(CatalogError::Unavailable(transport)) => return Err(transport),
                // Creation-time errors cannot come out of `adjust`; treat
                // them as a malformed backend response.
                Err(other) => {
                    return Err(TransportError::status(500, other.to_string()));
                }
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_catalog::{InMemoryCatalog, NewProduct};
    use pantry_movements::MovementLine;

    async fn seeded_catalog() -> (Arc<InMemoryCatalog>, ProductId, ProductId) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let p1 = catalog
            .create_product(NewProduct::new("Flour", "kg").with_quantity(5))
            .await
            .unwrap();
        let p2 = catalog
            .create_product(NewProduct::new("Oil", "l").with_quantity(8))
            .await
            .unwrap();
        (catalog, p1.id, p2.id)
    }

    #[tokio::test]
    async fn stock_in_adds_quantities() {
        let (catalog, p1, _) = seeded_catalog().await;
        let executor = MovementExecutor::new(catalog.clone());
        let movement = StockMovement::stock_in(
            "Acme",
            "dana",
            vec![MovementLine::new(p1.as_str(), "Flour", 10, "kg")],
        );

        let outcomes = executor.execute(&movement).await.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].old_quantity, Some(5));
        assert_eq!(outcomes[0].new_quantity, Some(15));
        assert_eq!(catalog.get(&p1).await.unwrap().unwrap().quantity, 15);
    }

    #[tokio::test]
    async fn distribution_subtracts_quantities() {
        let (catalog, _, p2) = seeded_catalog().await;
        let executor = MovementExecutor::new(catalog.clone());
        let movement = StockMovement::distribution(
            "kitchen",
            "dana",
            vec![MovementLine::new(p2.as_str(), "Oil", 3, "l")],
        );

        let outcomes = executor.execute(&movement).await.unwrap();
        assert!(outcomes[0].success);
        assert_eq!(catalog.get(&p2).await.unwrap().unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn missing_product_fails_only_its_own_line() {
        let (catalog, p1, p2) = seeded_catalog().await;
        let executor = MovementExecutor::new(catalog.clone());
        let movement = StockMovement::stock_in(
            "Acme",
            "dana",
            vec![
                MovementLine::new(p1.as_str(), "Flour", 1, "kg"),
                MovementLine::new("ghost", "Ghost", 1, "kg"),
                MovementLine::new(p2.as_str(), "Oil", 1, "l"),
            ],
        );

        let outcomes = executor.execute(&movement).await.unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert!(outcomes[2].success);
        assert!(outcomes[1].error.as_deref().unwrap().starts_with("PRODUCT_NOT_FOUND"));

        // Siblings committed despite the middle failure.
        assert_eq!(catalog.get(&p1).await.unwrap().unwrap().quantity, 6);
        assert_eq!(catalog.get(&p2).await.unwrap().unwrap().quantity, 9);
    }

    #[tokio::test]
    async fn stale_stock_is_reported_as_concurrent_modification() {
        let (catalog, p1, _) = seeded_catalog().await;
        let executor = MovementExecutor::new(catalog.clone());

        // Stock drained after the caller's snapshot would have been taken.
        catalog.adjust(&p1, -5).await.unwrap();

        let movement = StockMovement::distribution(
            "kitchen",
            "dana",
            vec![MovementLine::new(p1.as_str(), "Flour", 3, "kg")],
        );
        let outcomes = executor.execute(&movement).await.unwrap();
        assert!(!outcomes[0].success);
        let detail = outcomes[0].error.as_deref().unwrap();
        assert!(detail.starts_with("CONCURRENT_MODIFICATION"));
        assert!(detail.contains("available 0"));
        assert!(detail.contains("requested 3"));

        // Quantity untouched, never negative.
        assert_eq!(catalog.get(&p1).await.unwrap().unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn outcomes_preserve_input_line_order() {
        let (catalog, p1, p2) = seeded_catalog().await;
        let executor = MovementExecutor::new(catalog);
        let movement = StockMovement::stock_in(
            "Acme",
            "dana",
            vec![
                MovementLine::new(p2.as_str(), "Oil", 1, "l"),
                MovementLine::new(p1.as_str(), "Flour", 1, "kg"),
            ],
        );

        let outcomes = executor.execute(&movement).await.unwrap();
        assert_eq!(outcomes[0].product_id, p2);
        assert_eq!(outcomes[1].product_id, p1);
    }
}
