//! pipeline-demo: a static HTTP responder.
//!
//! Answers `GET /`, `GET /hello` and `GET /health` with fixed plain-text
//! bodies. The binary wires configuration, logging and the server together;
//! the library exposes the pieces so they can be driven from tests.

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use crate::http::{serve, serve_with_shutdown, start_server, Handle, ServerError};
pub use routes::create_router;
