//! Rate limiting middleware.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::handlers::AppState;
use crate::error::GuardError;
use crate::limiter::RateLimiter;

/// Counts the request against `"{client ip}:{METHOD} {path}"` and rejects it
/// with 429 once the configured limit is exceeded.
///
/// Requests without connection info (e.g. in-process tests) share the
/// `unknown` address.
pub async fn rate_limit(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let addr = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let action = format!("{} {}", request.method(), request.uri().path());
    let identifier = RateLimiter::identifier(&addr, &action);

    let limit = state.limiter.config().limit;
    let window = state.limiter.config().window();
    if !state.limiter.check_and_increment(&identifier, limit, window) {
        return next.run(request).await;
    }

    let retry_after = state.limiter.retry_after(&identifier, window);
    let mut response = GuardError::RateLimited(identifier).into_response();
    if let Some(retry_after) = retry_after {
        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from(retry_after.as_secs().max(1)),
        );
    }
    response
}
