use axum::{routing::get, Router};

pub mod movements;
pub mod products;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/products", products::router())
        .nest("/movements", movements::router())
}
