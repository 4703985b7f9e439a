//! Error types and handling for the `Hayfever` gateway

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Maximum number of characters of an upstream body echoed back to the caller
pub const BODY_PREVIEW_CHARS: usize = 300;

/// Failure outcomes of a pollen severity lookup
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Missing or non-numeric coordinate; the upstream is never called
    #[error("Invalid input: {message}")]
    BadRequest { message: String },

    /// Upstream answered with a non-success status
    #[error("Pollen API returned status {status}")]
    Upstream { status: u16, body_preview: String },

    /// Upstream body was not valid JSON
    #[error("Pollen API returned malformed JSON")]
    Parse { body_preview: String },

    /// Anything else: transport failures, panics, programming errors
    #[error("Unexpected error: {details}")]
    Unexpected { details: String },
}

impl GatewayError {
    /// Create a new bad request error
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an upstream error, truncating the raw body
    pub fn upstream(status: u16, raw_body: &str) -> Self {
        Self::Upstream {
            status,
            body_preview: body_preview(raw_body),
        }
    }

    /// Create a parse error, truncating the raw body
    pub fn parse(raw_body: &str) -> Self {
        Self::Parse {
            body_preview: body_preview(raw_body),
        }
    }

    /// Create a new unexpected error
    pub fn unexpected<S: Into<String>>(details: S) -> Self {
        Self::Unexpected {
            details: details.into(),
        }
    }

    /// HTTP status the error is reported with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Parse { .. } | GatewayError::Unexpected { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body handed back to the caller
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        match self {
            GatewayError::BadRequest { .. } => {
                json!({ "error": "Missing or invalid lat/lng query params" })
            }
            GatewayError::Upstream {
                status,
                body_preview,
            } => json!({
                "error": "Pollen API error",
                "status": status,
                "bodyPreview": body_preview,
            }),
            GatewayError::Parse { body_preview } => json!({
                "error": "Invalid JSON from Pollen API",
                "bodyPreview": body_preview,
            }),
            GatewayError::Unexpected { details } => json!({
                "error": "Server error",
                "details": details,
            }),
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::unexpected(format!("{err:#}"))
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::BadRequest { message } => {
                tracing::debug!("Rejected request: {}", message);
            }
            GatewayError::Unexpected { details } => {
                tracing::error!("Server error: {}", details);
            }
            _ => {}
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

/// First [`BODY_PREVIEW_CHARS`] characters of a raw body
#[must_use]
pub fn body_preview(raw: &str) -> String {
    raw.chars().take(BODY_PREVIEW_CHARS).collect()
}
