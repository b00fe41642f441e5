//! # dispatchq API
//!
//! HTTP interface for the dispatchq delivery queue.
//!
//! ## Routes
//!
//! ```text
//! GET    /deliveries            - Queues and processed history
//! POST   /deliveries            - Enqueue a delivery
//! POST   /deliveries/process    - Dequeue the next delivery
//! GET    /deliveries/stats      - Pending / processed counts
//! GET    /deliveries/cancelled  - Cancelled deliveries
//! GET    /deliveries/report     - Report over processed history
//! DELETE /deliveries/{id}       - Cancel a pending delivery
//!
//! GET    /health                - Health check
//! GET    /livez                 - Liveness probe
//! ```
//!
//! Handlers share one [`AppState`] wrapping the
//! [`PriorityQueueStore`](dispatchq_queue::PriorityQueueStore). Failures are
//! returned as `{"error": "<message>"}` with a 4xx/5xx status.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
