//! Read-only views of the store.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::delivery::DeliveryItem;

/// Contents of every category queue, keyed by lower-case category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryQueues {
    pub urgent: Vec<DeliveryItem>,
    pub fragile: Vec<DeliveryItem>,
    pub standard: Vec<DeliveryItem>,
}

impl CategoryQueues {
    /// Items queued under `category`, highest score first.
    pub fn get(&self, category: Category) -> &[DeliveryItem] {
        match category {
            Category::Urgent => &self.urgent,
            Category::Fragile => &self.fragile,
            Category::Standard => &self.standard,
        }
    }

    pub(crate) fn get_mut(&mut self, category: Category) -> &mut Vec<DeliveryItem> {
        match category {
            Category::Urgent => &mut self.urgent,
            Category::Fragile => &mut self.fragile,
            Category::Standard => &mut self.standard,
        }
    }

    /// Total number of queued items.
    pub fn len(&self) -> usize {
        self.urgent.len() + self.fragile.len() + self.standard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Full copy of the queues and the processed history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub deliveries: CategoryQueues,
    /// Processed deliveries, newest first.
    pub processed: Vec<DeliveryItem>,
}

/// Pending counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCounts {
    pub urgent: usize,
    pub fragile: usize,
    pub standard: usize,
    pub total: usize,
}

/// Queue statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: PendingCounts,
    /// Current history length, not a lifetime count.
    pub processed: usize,
    pub total: usize,
}

impl QueueStats {
    pub(crate) fn from_parts(queues: &CategoryQueues, processed: usize) -> Self {
        let pending = PendingCounts {
            urgent: queues.urgent.len(),
            fragile: queues.fragile.len(),
            standard: queues.standard.len(),
            total: queues.len(),
        };
        Self {
            pending,
            processed,
            total: pending.total + processed,
        }
    }
}
