//! # dispatchq Queue
//!
//! In-memory delivery queue for the dispatchq service.
//!
//! ## Features
//!
//! - One queue per delivery category, each kept sorted by priority score
//! - Fixed category precedence on dequeue (urgent, fragile, standard)
//! - Bounded history of processed deliveries and log of cancelled ones
//! - Filtered reports over the processed history
//!
//! All state lives behind a single lock inside [`PriorityQueueStore`].

pub mod category;
pub mod config;
pub mod delivery;
pub mod error;
pub mod report;
pub mod snapshot;
pub mod store;

pub use category::Category;
pub use config::StoreConfig;
pub use delivery::{priority_score, DeliveryItem, NewDelivery};
pub use error::QueueError;
pub use report::{DeliveryReport, ReportSort};
pub use snapshot::{CategoryQueues, PendingCounts, QueueSnapshot, QueueStats};
pub use store::{Dequeued, PriorityQueueStore};
