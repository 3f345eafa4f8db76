//! `pantry-catalog` — the Product Catalog collaborator.
//!
//! The catalog owns product records and is the single shared resource of the
//! system. The only mutation path the movement core uses is the atomic
//! `adjust` operation, which re-checks stock at apply time so a committed
//! quantity can never go negative.

pub mod catalog;
pub mod in_memory;
pub mod product;

pub use catalog::{CatalogError, ProductCatalog, StockChange};
pub use in_memory::InMemoryCatalog;
pub use product::{NewProduct, Product};
