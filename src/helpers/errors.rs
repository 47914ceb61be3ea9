//! Mapping of failures to `(StatusCode, Json<ErrorResponse>)` handler errors.

use axum::{http::StatusCode, response::Json};
use compute::ComputeError;
use sea_orm::DbErr;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// 400 with code `INVALID_INPUT`.
pub fn invalid_input(message: impl Into<String>) -> ApiError {
    let message = message.into();
    warn!("Rejected invalid input: {}", message);
    api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
}

pub fn not_found(what: &str, id: i32) -> ApiError {
    warn!("{} with ID {} not found", what, id);
    api_error(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("{} with ID {} not found", what, id),
    )
}

/// Logs the database failure and hides its details from the client.
pub fn database_error(context: &str, err: DbErr) -> ApiError {
    error!("{}: {}", context, err);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}

/// Every compute failure is the caller's fault, so all of them are 400s.
pub fn compute_error(err: ComputeError) -> ApiError {
    warn!("Computation rejected: {}", err);
    let code = match &err {
        ComputeError::InvalidInput { .. } => "INVALID_INPUT",
        ComputeError::DivisionByZero(_) => "DIVISION_BY_ZERO",
        ComputeError::Parse(_) => "INVALID_AMOUNT",
    };
    api_error(StatusCode::BAD_REQUEST, code, err.to_string())
}
