//! Category-ranked priority queue store.

use std::collections::VecDeque;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::category::Category;
use crate::config::StoreConfig;
use crate::delivery::{DeliveryItem, NewDelivery};
use crate::error::QueueError;
use crate::report::{DeliveryReport, ReportSort};
use crate::snapshot::{CategoryQueues, QueueSnapshot, QueueStats};

/// A delivery removed by [`PriorityQueueStore::dequeue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dequeued {
    pub delivery: DeliveryItem,
    /// Queue the delivery was taken from.
    pub source: Category,
}

#[derive(Default)]
struct StoreState {
    queues: CategoryQueues,
    /// Newest first.
    processed: VecDeque<DeliveryItem>,
    /// Newest first.
    cancelled: VecDeque<DeliveryItem>,
}

/// Delivery priority queue.
///
/// Holds one queue per [`Category`], each sorted descending by priority score
/// with ties in arrival order, plus bounded logs of processed and cancelled
/// deliveries. Every operation runs under a single lock; mutations take it
/// exclusively for their whole read-modify-write step.
pub struct PriorityQueueStore {
    config: StoreConfig,
    state: RwLock<StoreState>,
}

impl PriorityQueueStore {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        let config = StoreConfig {
            history_capacity: config.history_capacity.max(1),
            cancelled_capacity: config.cancelled_capacity.max(1),
        };
        Self {
            config,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Store configuration in effect.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Validate, score and enqueue a delivery.
    ///
    /// The item is appended to its category queue, which is then stably
    /// re-sorted by descending score. Nothing is mutated on error.
    pub fn enqueue(&self, request: NewDelivery) -> Result<DeliveryItem, QueueError> {
        let item = request.into_item()?;

        let mut state = self.state.write();
        let queue = state.queues.get_mut(item.category);
        queue.push(item.clone());
        queue.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

        debug!(
            "Enqueued delivery: {} (type: {}, score: {}, depth: {})",
            item.id,
            item.category,
            item.priority_score,
            queue.len()
        );

        Ok(item)
    }

    /// Remove the head of the highest-precedence non-empty queue.
    ///
    /// Precedence is urgent, fragile, standard, independent of scores held in
    /// lower-precedence queues. The item moves to the front of the processed
    /// history.
    pub fn dequeue(&self) -> Result<Dequeued, QueueError> {
        let mut state = self.state.write();

        let source = Category::PRECEDENCE
            .into_iter()
            .find(|category| !state.queues.get(*category).is_empty())
            .ok_or(QueueError::QueueEmpty)?;

        let delivery = state.queues.get_mut(source).remove(0);
        push_bounded(&mut state.processed, delivery.clone(), self.config.history_capacity);

        debug!(
            "Dequeued delivery: {} from {} (score: {})",
            delivery.id, source, delivery.priority_score
        );

        Ok(Dequeued { delivery, source })
    }

    /// Cancel the first pending delivery with `id`.
    ///
    /// Queues are searched in precedence order and only one item is removed
    /// even when ids repeat. The remaining items keep their order.
    pub fn cancel(&self, id: &str) -> Result<DeliveryItem, QueueError> {
        let mut state = self.state.write();

        let found = Category::PRECEDENCE.into_iter().find_map(|category| {
            state
                .queues
                .get(category)
                .iter()
                .position(|item| item.id == id)
                .map(|index| (category, index))
        });

        let Some((category, index)) = found else {
            return Err(QueueError::DeliveryNotFound(id.to_string()));
        };

        let delivery = state.queues.get_mut(category).remove(index);
        push_bounded(&mut state.cancelled, delivery.clone(), self.config.cancelled_capacity);

        info!("Cancelled delivery: {} (type: {})", delivery.id, category);

        Ok(delivery)
    }

    /// Pending, processed and total counts.
    pub fn stats(&self) -> QueueStats {
        let state = self.state.read();
        QueueStats::from_parts(&state.queues, state.processed.len())
    }

    /// Copy of every queue and the processed history.
    pub fn snapshot(&self) -> QueueSnapshot {
        let state = self.state.read();
        QueueSnapshot {
            deliveries: state.queues.clone(),
            processed: state.processed.iter().cloned().collect(),
        }
    }

    /// Cancelled deliveries, newest first.
    pub fn cancelled(&self) -> Vec<DeliveryItem> {
        self.state.read().cancelled.iter().cloned().collect()
    }

    /// Report over the processed history.
    pub fn report(&self, filter: Option<Category>, sort: ReportSort) -> DeliveryReport {
        let state = self.state.read();
        DeliveryReport::build(&state.processed, filter, sort)
    }

    /// Number of pending deliveries.
    pub fn len(&self) -> usize {
        self.state.read().queues.len()
    }

    /// Check if no delivery is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PriorityQueueStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

/// Push to the front, dropping the oldest entries past `capacity`.
fn push_bounded(log: &mut VecDeque<DeliveryItem>, item: DeliveryItem, capacity: usize) {
    log.push_front(item);
    log.truncate(capacity);
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
