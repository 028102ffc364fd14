//! Server module for building the invoice HTTP server
//!
//! The `ServerBuilder` wires a `DocumentStore` and the configuration into a
//! `ServerHost`, which the REST exposure turns into an Axum router.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
