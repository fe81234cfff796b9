//! HTTP layer for the auth API.
//!
//! The `Pipeline` wraps every outbound call with bearer-token attachment,
//! opportunistic token rotation capture, and 401 invalidation. Endpoint
//! modules build `ApiRequest` values and decode `ApiResponse` bodies;
//! they never touch tokens themselves.

pub mod pipeline;

pub use pipeline::{ApiRequest, ApiResponse, Pipeline};
