//! API Module
//!
//! Thin HTTP surface that consumes the cache and the rate limiter.
//!
//! # Endpoints
//! - `GET /health` - Cache probe plus stats snapshot
//! - `GET /stats` - Cache stats snapshot
//! - `DELETE /cache` - Clear the cache

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
