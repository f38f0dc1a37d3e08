use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use warehouse_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidArgument(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "Item not found"),
        DomainError::CapacityExceeded { .. } => json_error(
            StatusCode::CONFLICT,
            "Failed to add item: Category capacity exceeded",
        ),
    }
}

pub fn bad_request(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, message)
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}
