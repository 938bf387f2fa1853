//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applies to every route, including the fallback and the static mount.
//!
//! Responsibility:
//! - Request-Id propagation (X-Request-Id sent by the proxy is echoed back)
//! - Access logging / request tracing (TraceLayer)
//! - Panic containment (fixed 500 body, no payload on the wire)
//! - Global timeouts
//!
//! The timeout comes from `Config` (`REQUEST_TIMEOUT_SECONDS`). The body limit is
//! enforced by `RequestInspector` so an oversized body fails with the JSON error shape.

use std::any::Any;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::header::HeaderName;
use axum::response::{IntoResponse, Response};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                AppError::Timeout
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                AppError::Internal
            }
        }))
        // Echo the caller's request id; request headers reach the inspector untouched.
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Access log / tracing for all requests.
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(config.request_timeout));

    router.layer(layers)
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal.into_response()
}
