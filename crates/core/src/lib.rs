//! `pantry-core` — shared primitives for the stock-movement system.
//!
//! This crate contains identifiers, the transport error taxonomy, and the
//! `ServiceResponse` envelope. No business rules live here.

pub mod error;
pub mod id;
pub mod response;

pub use error::TransportError;
pub use id::{MovementId, ProductId};
pub use response::ServiceResponse;
