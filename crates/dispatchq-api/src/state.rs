//! State shared by every handler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dispatchq_queue::PriorityQueueStore;

pub struct AppState {
    pub store: Arc<PriorityQueueStore>,
    started: Instant,
}

impl AppState {
    pub fn new(store: Arc<PriorityQueueStore>) -> Self {
        Self {
            store,
            started: Instant::now(),
        }
    }

    /// Time since this state was built, i.e. since the server came up.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

/// A fresh, empty store with default capacities.
impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(PriorityQueueStore::default()))
    }
}
