use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use medstock_core::DomainError;
use medstock_infra::StoreError;

/// Map a store/domain failure to a client response.
///
/// Domain failures become 4xx with their message; backend failures are
/// logged server-side and surface as a generic 500 with no internal detail.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(d) => domain_error_to_response(d),
        StoreError::Backend(msg) => {
            tracing::error!("storage failure: {msg}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error",
            )
        }
    }
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        DomainError::InsufficientStock { .. } => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "insufficient_stock",
            err.to_string(),
        ),
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Unauthorized => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid username or password",
        ),
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
