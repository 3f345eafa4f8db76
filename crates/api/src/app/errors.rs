use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pantry_catalog::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("product not found: {id}"))
        }
        CatalogError::DuplicateName(name) => json_error(
            StatusCode::CONFLICT,
            "duplicate_name",
            format!("product name already in use: {name}"),
        ),
        CatalogError::Invalid(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::StaleStock { .. } => {
            json_error(StatusCode::CONFLICT, "conflict", err.to_string())
        }
        CatalogError::Overflow { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "quantity_overflow", err.to_string())
        }
        CatalogError::Unavailable(e) => {
            json_error(StatusCode::BAD_GATEWAY, "catalog_unavailable", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
