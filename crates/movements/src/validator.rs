//! Movement validation against a catalog snapshot.
//!
//! Pure checks, no side effects. All problems in a batch are collected and
//! reported together so a caller can fix everything in one pass; only the
//! empty-batch check returns immediately (there is nothing else to inspect).

use std::collections::HashMap;

use thiserror::Error;

use pantry_core::ProductId;

use crate::movement::{MovementType, StockMovement};

/// Quantities read from the catalog, keyed by product id.
pub type StockSnapshot = HashMap<ProductId, i64>;

/// Client-correctable validation failure. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("movement contains no lines")]
    EmptyBatch,

    #[error("line {index}: {reason}")]
    InvalidLine { index: usize, reason: String },

    #[error("supplier is required for stock-in movements")]
    MissingSupplier,

    #[error("department is required for distribution movements")]
    MissingDepartment,

    #[error("line {index}: insufficient stock for {product_id} (available {available}, requested {requested})")]
    InsufficientStock {
        index: usize,
        product_id: ProductId,
        available: i64,
        requested: i64,
    },
}

impl ValidationError {
    /// Stable wire code, used in `ServiceResponse.errors`.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyBatch => "EMPTY_BATCH",
            ValidationError::InvalidLine { .. } => "INVALID_LINE",
            ValidationError::MissingSupplier => "MISSING_SUPPLIER",
            ValidationError::MissingDepartment => "MISSING_DEPARTMENT",
            ValidationError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }

    /// `CODE: detail` rendering for the response error list.
    pub fn to_wire(&self) -> String {
        format!("{}: {}", self.code(), self)
    }
}

/// Validate a proposed movement against a stock snapshot.
///
/// Checks, in order:
/// 1. non-empty batch (immediate return);
/// 2. each line has a non-empty product id and a positive quantity
///    (one `InvalidLine` per bad line, collected);
/// 3. stock-in requires a supplier;
/// 4. distribution requires a department;
/// 5. distribution lines must not exceed the snapshot quantity.
///
/// Lines whose product is absent from the snapshot are not stock-checked
/// here; the executor reports those as not-found at apply time.
pub fn validate(movement: &StockMovement, snapshot: &StockSnapshot) -> Result<(), Vec<ValidationError>> {
    if movement.lines.is_empty() {
        return Err(vec![ValidationError::EmptyBatch]);
    }

    let mut errors = Vec::new();

    for (index, line) in movement.lines.iter().enumerate() {
        let mut problems = Vec::new();
        if line.product_id.is_empty() {
            problems.push("missing product id");
        }
        if line.quantity <= 0 {
            problems.push("quantity must be positive");
        }
        if !problems.is_empty() {
            errors.push(ValidationError::InvalidLine {
                index,
                reason: problems.join("; "),
            });
        }
    }

    match movement.movement_type {
        MovementType::StockIn => {
            let supplier_ok = movement.supplier.as_deref().is_some_and(|s| !s.trim().is_empty());
            if !supplier_ok {
                errors.push(ValidationError::MissingSupplier);
            }
        }
        MovementType::Distribution => {
            let department_ok = movement.department.as_deref().is_some_and(|d| !d.trim().is_empty());
            if !department_ok {
                errors.push(ValidationError::MissingDepartment);
            }

            for (index, line) in movement.lines.iter().enumerate() {
                // Structurally invalid lines were already reported above.
                if line.product_id.is_empty() || line.quantity <= 0 {
                    continue;
                }
                if let Some(&available) = snapshot.get(&line.product_id) {
                    if line.quantity > available {
                        errors.push(ValidationError::InsufficientStock {
                            index,
                            product_id: line.product_id.clone(),
                            available,
                            requested: line.quantity,
                        });
                    }
                }
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
