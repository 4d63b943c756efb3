//! Shutdown triggers and connection draining.

use std::future::Future;
use std::time::Duration;

use axum_server::Handle;

/// Resolves on the first termination request: Ctrl+C, or SIGTERM on Unix.
pub async fn termination_signal() {
    let signal = wait_for_signal().await;
    tracing::info!(signal, "Termination requested");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "Cannot listen for SIGTERM, only Ctrl+C stops the server");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        name = ctrl_c() => name,
        _ = sigterm.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

/// Once `signal` resolves, stop accepting connections and give the open ones
/// `grace` to finish. Connections still busy after that are closed.
pub fn drain_after<F>(signal: F, handle: Handle, grace: Duration)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        signal.await;

        tracing::info!(
            open_connections = handle.connection_count(),
            grace_ms = grace.as_millis() as u64,
            "Draining connections"
        );
        handle.graceful_shutdown(Some(grace));
    });
}
