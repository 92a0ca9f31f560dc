//! Unified relay error type.
//!
//! The chat handler returns `Result<_, RelayError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON-body HTTP
//! response with an appropriate status code. Upstream detail is logged in
//! full but never forwarded to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forge_logging::forge_error;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while relaying a chat completion.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The provider answered with a non-success status before streaming.
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    /// The provider connection itself failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            RelayError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            RelayError::UpstreamStatus { status } => {
                forge_error!("provider returned status {status}");
                (StatusCode::BAD_GATEWAY, "upstream provider error".to_owned())
            }
            RelayError::Upstream(e) => {
                forge_error!("provider request failed: {e}");
                (StatusCode::BAD_GATEWAY, "upstream provider error".to_owned())
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}
