//! Queue errors.

use thiserror::Error;

/// Queue error types.
///
/// Every variant is local and recoverable; none of them leaves the store
/// partially mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// A required delivery field was absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The delivery type is not one of the known categories.
    #[error("Invalid delivery type: {0}")]
    InvalidCategory(String),

    /// All category queues are empty.
    #[error("No deliveries to process")]
    QueueEmpty,

    /// No pending delivery carries the requested id.
    #[error("Delivery not found: {0}")]
    DeliveryNotFound(String),

    /// Unknown report sort key.
    #[error("Invalid report sort: {0}")]
    InvalidSort(String),
}
