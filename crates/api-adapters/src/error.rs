//! # ApiError
//!
//! Every failure that reaches the HTTP boundary is reported as a 500 with the
//! same payload shape, whatever its domain kind. The kind only affects the
//! log level.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Body missing, not JSON, or not an object
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Domain(e) if !e.is_client_error() => error!(error = %self, "request failed"),
            _ => warn!(error = %self, "request failed"),
        }

        let body = ErrorBody {
            name: "RequestFailed",
            message: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
