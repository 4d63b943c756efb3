//! HTTP server module.
//!
//! Plain HTTP only; TLS is expected to be terminated in front of the service.
//!
//! The server includes:
//! - Bind failure reported as a startup error
//! - Graceful shutdown on SIGTERM/SIGINT with a bounded drain period

mod server;
mod shutdown;

pub use axum_server::Handle;
pub use server::{serve, serve_with_shutdown, start_server, ServerError};
