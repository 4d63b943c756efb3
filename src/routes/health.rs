//! Liveness endpoint polled by the deploy stage of the pipeline.
//!
//! Answers with a fixed sentence whenever the process can serve HTTP at all;
//! it checks nothing else. The router marks the response `Cache-Control:
//! no-store` so a proxy never answers for a process that is gone.

/// Body returned by `GET /health`.
pub const HEALTH_MESSAGE: &str = "Application is running successfully!";

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}
