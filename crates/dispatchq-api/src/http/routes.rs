//! HTTP route definitions.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get, post, MethodRouter},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::http::handlers::{
    add_delivery, cancel_delivery, cancelled_deliveries, delivery_report, delivery_stats,
    list_deliveries, process_delivery,
};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the main router.
///
/// ## Route Structure
///
/// ```text
/// /deliveries
///   GET    /deliveries            - Queues and processed history
///   POST   /deliveries            - Enqueue a delivery
///   POST   /deliveries/process    - Dequeue the next delivery
///   GET    /deliveries/stats      - Counts
///   GET    /deliveries/cancelled  - Cancelled log
///   GET    /deliveries/report     - Report over processed history
///   DELETE /deliveries/{id}       - Cancel a pending delivery (any id,
///                                   including `process`, `stats`, ...)
///
/// /health  - Health check
/// /livez   - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let delivery_routes = Router::new()
        .route("/deliveries", get(list_deliveries).post(add_delivery))
        .route(
            "/deliveries/process",
            post(process_delivery).merge(cancel_fixed_id("process")),
        )
        .route(
            "/deliveries/stats",
            get(delivery_stats).merge(cancel_fixed_id("stats")),
        )
        .route(
            "/deliveries/cancelled",
            get(cancelled_deliveries).merge(cancel_fixed_id("cancelled")),
        )
        .route(
            "/deliveries/report",
            get(delivery_report).merge(cancel_fixed_id("report")),
        )
        .route("/deliveries/{id}", delete(cancel_delivery))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    with_middleware(
        Router::new()
            .merge(delivery_routes)
            .merge(monitoring_routes)
            .merge(liveness_route),
    )
}

/// `DELETE` for a delivery whose id equals a fixed sub-route segment.
///
/// Static segments take priority over `{id}`, so these ids would otherwise
/// never reach [`cancel_delivery`].
fn cancel_fixed_id(id: &'static str) -> MethodRouter<Arc<AppState>> {
    delete(move |state: State<Arc<AppState>>| cancel_delivery(state, Path(id.to_string())))
}

/// Wrap a router with panic recovery, request tracing and permissive CORS.
pub(crate) fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Turn a handler panic into a 500 with the panic message.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(message).into_response()
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
