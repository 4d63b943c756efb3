//! HTTP route handlers.
//!
//! Three literal paths, each answering a fixed plain-text body. Anything else
//! falls through to the framework defaults: 404 for an unknown path, 405 (with
//! an `Allow` header) for a known path hit with the wrong method.
//!
//! Every request, matched or not, passes through [`trace_request`].

pub mod health;
pub mod home;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::trace_request;

/// Creates the Axum router with all routes.
pub fn create_router() -> Router {
    let home_routes = Router::new()
        .route("/", get(home::index))
        .route("/hello", get(home::hello));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(home_routes)
        .merge(health_routes)
        // Outermost, so unmatched requests are logged too
        .layer(middleware::from_fn(trace_request))
}
