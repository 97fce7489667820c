//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that wires:
//! - the catalog store and service
//! - the REST routes under the configured prefix
//! - graceful shutdown on SIGTERM / Ctrl+C

pub mod builder;
pub mod exposure;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use exposure::rest::handlers::AppState;
