//! Movement data model.

use serde::{Deserialize, Serialize};

use pantry_core::ProductId;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Incoming supply; increases product quantity. Requires a supplier.
    StockIn,
    /// Outgoing allocation to a department; decreases product quantity.
    /// Requires a department and may never drive stock negative.
    Distribution,
}

/// One product's quantity delta within a movement.
///
/// `product_name` and `unit` are denormalized at submission time so the
/// audit record stays readable even if the product is later renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit: String,
}

impl MovementLine {
    pub fn new(product_id: impl Into<ProductId>, product_name: impl Into<String>, quantity: i64, unit: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A proposed batch of per-product quantity changes: the unit of work.
///
/// Constructed client-side and submitted once. The committed form is
/// [`crate::record::MovementRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    /// Target department; required for distribution, ignored for stock-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Source supplier; required for stock-in, ignored otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    /// Attribution: who performed the movement.
    pub stock_manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Ordered line items; must be non-empty to validate.
    pub lines: Vec<MovementLine>,
}

impl StockMovement {
    pub fn stock_in(supplier: impl Into<String>, stock_manager: impl Into<String>, lines: Vec<MovementLine>) -> Self {
        Self {
            movement_type: MovementType::StockIn,
            department: None,
            supplier: Some(supplier.into()),
            stock_manager: stock_manager.into(),
            notes: None,
            lines,
        }
    }

    pub fn distribution(department: impl Into<String>, stock_manager: impl Into<String>, lines: Vec<MovementLine>) -> Self {
        Self {
            movement_type: MovementType::Distribution,
            department: Some(department.into()),
            supplier: None,
            stock_manager: stock_manager.into(),
            notes: None,
            lines,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The product ids this movement touches, in line order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|l| l.product_id.clone()).collect()
    }

    /// Signed catalog delta for one line of this movement.
    pub fn delta_for(&self, line: &MovementLine) -> i64 {
        match self.movement_type {
            MovementType::StockIn => line.quantity,
            MovementType::Distribution => -line.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MovementType::StockIn).unwrap(), "\"stock_in\"");
        assert_eq!(serde_json::to_string(&MovementType::Distribution).unwrap(), "\"distribution\"");
    }

    #[test]
    fn movement_serializes_type_field() {
        let m = StockMovement::stock_in("Acme", "dana", vec![MovementLine::new("p1", "Flour", 3, "kg")]);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "stock_in");
        assert_eq!(json["supplier"], "Acme");
        assert!(json.get("department").is_none());
        assert_eq!(json["lines"][0]["product_id"], "p1");
    }

    #[test]
    fn deltas_follow_movement_direction() {
        let line = MovementLine::new("p1", "Flour", 4, "kg");
        let incoming = StockMovement::stock_in("Acme", "dana", vec![line.clone()]);
        let outgoing = StockMovement::distribution("kitchen", "dana", vec![line.clone()]);
        assert_eq!(incoming.delta_for(&line), 4);
        assert_eq!(outgoing.delta_for(&line), -4);
    }
}
