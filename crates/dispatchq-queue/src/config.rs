//! Store configuration.

use dispatchq_config::QueueConfig;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of processed deliveries kept in history.
    pub history_capacity: usize,

    /// Maximum number of cancelled deliveries kept in the log.
    pub cancelled_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from(&QueueConfig::default())
    }
}

impl From<&QueueConfig> for StoreConfig {
    fn from(config: &QueueConfig) -> Self {
        Self {
            history_capacity: config.history_capacity,
            cancelled_capacity: config.cancelled_capacity,
        }
    }
}
