//! Committed movement audit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::MovementId;

use crate::movement::{MovementLine, MovementType};
use crate::StockMovement;

/// Immutable projection of a committed [`StockMovement`].
///
/// Echoes the submitted fields and adds the server-assigned id, line count,
/// and commit timestamp. Updates and deletes are administrative operations
/// outside this core; once written, a record never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: MovementId,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub stock_manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub lines: Vec<MovementLine>,
    pub total_items: usize,
    /// Monetary value in minor currency units, when known. Movement lines
    /// carry no prices, so this is usually `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<u64>,
    pub recorded_at: DateTime<Utc>,
}

impl MovementRecord {
    /// Build the audit record for a fully-applied movement. The timestamp is
    /// assigned here, at commit time, never by the submitter.
    pub fn commit(movement: StockMovement, recorded_at: DateTime<Utc>) -> Self {
        let total_items = movement.lines.len();
        Self {
            id: MovementId::new(),
            movement_type: movement.movement_type,
            department: movement.department,
            supplier: movement.supplier,
            stock_manager: movement.stock_manager,
            notes: movement.notes,
            lines: movement.lines,
            total_items,
            total_value: None,
            recorded_at,
        }
    }

    pub fn with_total_value(mut self, total_value: u64) -> Self {
        self.total_value = Some(total_value);
        self
    }
}
