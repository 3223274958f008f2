//! services/api/src/web/error.rs
//!
//! Translates port errors into the machine-readable `{error}` bodies the
//! API returns for every failure.

use axum::{http::StatusCode, Json};
use contract_review_core::ports::PortError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// The body returned with every non-2xx response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// The error half of every handler's return type.
pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn body(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Maps each `PortError` variant to its status code. Unexpected failures are
/// logged and surface as an opaque 500.
pub fn from_port(err: PortError) -> ErrorResponse {
    match err {
        PortError::Validation(msg) => body(StatusCode::BAD_REQUEST, msg),
        PortError::Authentication(msg) => body(StatusCode::UNAUTHORIZED, msg),
        PortError::InvalidCredential(msg) => body(StatusCode::UNAUTHORIZED, msg),
        PortError::NotFound(msg) => body(StatusCode::NOT_FOUND, msg),
        PortError::Unexpected(msg) => {
            error!("Unexpected failure: {}", msg);
            body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub fn bad_request(message: impl Into<String>) -> ErrorResponse {
    body(StatusCode::BAD_REQUEST, message)
}

pub fn unauthorized(message: impl Into<String>) -> ErrorResponse {
    body(StatusCode::UNAUTHORIZED, message)
}
