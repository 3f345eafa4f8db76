//! `pantry-api` — HTTP surface for the stock-movement service.

pub mod app;
