//! `pantry-movements` — pure movement domain.
//!
//! This crate contains the movement data model, the validator, and the
//! committed audit record. Everything here is deterministic and free of IO;
//! catalog access and retry concerns live in `pantry-service`.

pub mod movement;
pub mod record;
pub mod validator;

pub use movement::{MovementLine, MovementType, StockMovement};
pub use record::MovementRecord;
pub use validator::{validate, StockSnapshot, ValidationError};
