//! Per-request span and completion log.
//!
//! Every request runs inside a `request` span carrying a fresh UUID v4 and the
//! route it matched. Requests that match no route are labelled as such, so a
//! 404 or 405 reads differently from a served page without being an error.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use http::StatusCode;
use tracing::Instrument;
use uuid::Uuid;

/// Route label for requests that matched none of the routes.
pub const UNMATCHED_ROUTE: &str = "<unmatched>";

/// What the router did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A handler answered.
    Served,
    /// No route for the path.
    NotFound,
    /// The path exists but not for this method.
    MethodNotAllowed,
}

impl Outcome {
    pub fn classify(matched: bool, status: StatusCode) -> Self {
        match (matched, status) {
            (false, _) => Self::NotFound,
            (true, StatusCode::METHOD_NOT_ALLOWED) => Self::MethodNotAllowed,
            (true, _) => Self::Served,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Served => "served",
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
        }
    }
}

/// Wraps the request in a span and logs one line when the response is ready.
///
/// Must be added with `Router::layer` so [`MatchedPath`] is already set.
pub async fn trace_request(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned());

    let span = tracing::info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
        route = route.as_deref().unwrap_or(UNMATCHED_ROUTE),
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let outcome = Outcome::classify(route.is_some(), response.status());

    span.in_scope(|| {
        tracing::info!(
            status = response.status().as_u16(),
            outcome = outcome.as_str(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Request completed"
        );
    });

    response
}
