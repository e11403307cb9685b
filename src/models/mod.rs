//! Response models for the demonstration API

pub mod responses;

pub use responses::{CacheHealth, ClearResponse, HealthResponse};
