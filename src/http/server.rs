//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// Runs until SIGINT/SIGTERM, then drains for `http.shutdown_timeout_seconds`.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    serve_with_shutdown(app, config, Handle::new(), shutdown::termination_signal()).await
}

/// Serve on the configured address until `signal` resolves.
///
/// Once it does, new connections are refused and open ones get
/// `http.shutdown_timeout_seconds` to finish before they are closed.
pub async fn serve_with_shutdown<F>(
    app: Router,
    config: &AppConfig,
    handle: Handle,
    signal: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    shutdown::drain_after(signal, handle.clone(), config.http.shutdown_timeout());

    let watcher = handle.clone();
    tokio::spawn(async move {
        if let Some(bound) = watcher.listening().await {
            tracing::info!(addr = %bound, "Listening on http://{}", bound);
        }
    });

    serve(app, config.http.socket_addr(), handle).await
}

/// Bind `addr` and serve `app` until `handle` is told to shut down.
///
/// Returns [`ServerError::Bind`] if the listener cannot be created, e.g. when
/// the port is already in use.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
