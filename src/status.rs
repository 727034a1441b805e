//! Health probe routes.

use axum::{Router, http::StatusCode, routing::get};

use crate::errors::ApiError;

/// `GET /status` answers 202 `"OK"`; `GET /status/error` fails on purpose so
/// the uncategorized error path can be checked end to end.
pub fn status_router() -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/status/error", get(status_error))
}

async fn status() -> (StatusCode, &'static str) {
    (StatusCode::ACCEPTED, "OK")
}

async fn status_error() -> Result<StatusCode, ApiError> {
    Err(ApiError::default_error("Default Error"))
}
