//! HTTP API layer: router, error mapping, auth middleware, endpoints.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod types;
