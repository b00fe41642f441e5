//! Delivery queue handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use dispatchq_queue::{
    Category, DeliveryItem, DeliveryReport, NewDelivery, QueueSnapshot, QueueStats, ReportSort,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Response carrying a single delivery.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub message: String,
    pub delivery: DeliveryItem,
}

/// Response from processing the next delivery.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub delivery: DeliveryItem,
    /// Queue the delivery was taken from.
    pub source_queue: Category,
}

/// Response for listing cancelled deliveries.
#[derive(Debug, Serialize)]
pub struct CancelledListResponse {
    pub count: usize,
    pub deliveries: Vec<DeliveryItem>,
}

/// Query parameters for the report endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Category filter, case-insensitive.
    #[serde(rename = "type")]
    pub category: Option<String>,

    /// `priority` (default) or `estimated_time`.
    pub sort: Option<String>,
}

/// List queued and processed deliveries.
///
/// GET /deliveries
pub async fn list_deliveries(State(state): State<Arc<AppState>>) -> Json<QueueSnapshot> {
    Json(state.store.snapshot())
}

/// Enqueue a delivery.
///
/// POST /deliveries
pub async fn add_delivery(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDelivery>, JsonRejection>,
) -> Result<(StatusCode, Json<DeliveryResponse>), ApiError> {
    let Json(request) = payload?;
    let delivery = state.store.enqueue(request)?;

    info!(
        "Delivery added: {} (type: {}, score: {})",
        delivery.id, delivery.category, delivery.priority_score
    );

    Ok((
        StatusCode::CREATED,
        Json(DeliveryResponse {
            message: format!("Delivery {} added successfully", delivery.id),
            delivery,
        }),
    ))
}

/// Process the next delivery by category precedence.
///
/// POST /deliveries/process
pub async fn process_delivery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let dequeued = state.store.dequeue()?;

    info!(
        "Processing delivery: {} (from {})",
        dequeued.delivery.id, dequeued.source
    );

    Ok(Json(ProcessResponse {
        message: format!("Processing delivery {}", dequeued.delivery.id),
        delivery: dequeued.delivery,
        source_queue: dequeued.source,
    }))
}

/// Queue statistics.
///
/// GET /deliveries/stats
pub async fn delivery_stats(State(state): State<Arc<AppState>>) -> Json<QueueStats> {
    Json(state.store.stats())
}

/// Cancel a pending delivery.
///
/// DELETE /deliveries/{id}
pub async fn cancel_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    let delivery = state.store.cancel(&id)?;

    Ok(Json(DeliveryResponse {
        message: format!("Delivery {} cancelled", delivery.id),
        delivery,
    }))
}

/// List cancelled deliveries, newest first.
///
/// GET /deliveries/cancelled
pub async fn cancelled_deliveries(
    State(state): State<Arc<AppState>>,
) -> Json<CancelledListResponse> {
    let deliveries = state.store.cancelled();
    Json(CancelledListResponse {
        count: deliveries.len(),
        deliveries,
    })
}

/// Report over processed deliveries.
///
/// GET /deliveries/report?type=urgent&sort=estimated_time
pub async fn delivery_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DeliveryReport>, ApiError> {
    let filter = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<ReportSort>)
        .transpose()?
        .unwrap_or_default();

    Ok(Json(state.store.report(filter, sort)))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
