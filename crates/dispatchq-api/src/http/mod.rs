//! HTTP interface module.
//!
//! Provides REST endpoints for:
//! - Delivery submission, processing and cancellation
//! - Queue statistics and reports
//! - Health checks

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
