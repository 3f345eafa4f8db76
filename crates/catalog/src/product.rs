//! Product record and creation request.

use serde::{Deserialize, Serialize};

use pantry_core::ProductId;

/// A catalog product.
///
/// `quantity` is the single canonical stock field; no duplicate-meaning
/// aliases exist anywhere in the model. Invariant: never negative after any
/// committed movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
}

/// Request to create a product. The catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub unit: String,
    /// Initial stock level; defaults to zero.
    #[serde(default)]
    pub quantity: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            quantity: 0,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
}
