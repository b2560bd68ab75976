//! HBnB web front end.
//!
//! Server-rendered pages for browsing places, reading reviews, and posting
//! reviews, backed entirely by the HBnB REST API. The visitor's bearer token
//! lives in the `token` cookie; this server keeps no state of its own.
//!
//! The binary in `main.rs` only wires configuration, logging, and the
//! listener around [`app`], so the whole router can be driven in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Layer order matches [`middleware`]: Sentry outermost, then the request
/// span, then the request id recorded on it, then security headers.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The REST API is not probed.
async fn health() -> &'static str {
    "ok"
}
