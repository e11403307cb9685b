//! Error types for the guard primitives and their HTTP surface
//!
//! Cache misses, expiry and eviction are not errors; they surface as `None`.
//! A `true` from the rate limiter becomes an error only when the API layer
//! chooses to reject the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message shown to callers that hit the rate limit.
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

// == Guard Error Enum ==
#[derive(Error, Debug)]
pub enum GuardError {
    /// Caller exceeded its request budget
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Storage backend failure. Reserved for durable backends; the in-memory
    /// cache never produces it.
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GuardError::RateLimited(_) => {
                (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE.to_string())
            }
            GuardError::Backend(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            GuardError::InvalidConfig(msg) | GuardError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, GuardError>;
