use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use pantry_core::{MovementId, ServiceResponse};
use pantry_movements::{MovementRecord, StockMovement};
use pantry_service::{messages, MovementRecordStore};

use crate::app::{errors, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(submit_movement).get(list_movements))
        .route("/:id", get(get_movement))
}

pub async fn submit_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<StockMovement>,
) -> axum::response::Response {
    let response = services.service.submit_movement(body).await;
    (status_for(&response), Json(response)).into_response()
}

pub async fn get_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MovementId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid movement id"),
    };
    match services.records.get(&id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "movement not found"),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string()),
    }
}

pub async fn list_movements(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.records.list().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string()),
    }
}

/// Map a submission outcome onto an HTTP status. The response body is the
/// service envelope either way. Failure classes are keyed by the summary
/// constants the service writes into `message`.
fn status_for(response: &ServiceResponse<MovementRecord>) -> StatusCode {
    if response.is_success() {
        return StatusCode::CREATED;
    }
    match response.message.as_deref() {
        Some(messages::VALIDATION_FAILED) => StatusCode::BAD_REQUEST,
        Some(messages::TIMEOUT) => StatusCode::GATEWAY_TIMEOUT,
        Some(messages::NETWORK_ERROR) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}
