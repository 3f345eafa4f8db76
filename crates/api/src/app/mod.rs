//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use pantry_catalog::InMemoryCatalog;
use pantry_service::{InMemoryRecordStore, LogNotifier, MovementService};

pub mod dto;
pub mod errors;
pub mod routes;

/// Concrete service stack served by this binary.
pub type Services = MovementService<InMemoryCatalog, InMemoryRecordStore, LogNotifier>;

/// Shared application services, injected into handlers via `Extension`.
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub records: Arc<InMemoryRecordStore>,
    pub notifier: Arc<LogNotifier>,
    pub service: Services,
}

impl AppServices {
    /// In-memory wiring (the only backend this binary ships).
    pub fn build() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let records = Arc::new(InMemoryRecordStore::new());
        let notifier = Arc::new(LogNotifier);
        let service = MovementService::new(catalog.clone(), records.clone(), notifier.clone());
        Self {
            catalog,
            records,
            notifier,
            service,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router()
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
