//! Shape of `dispatchq.toml`.
//!
//! Every section and key is optional; anything left out takes the value of the
//! type's `Default` impl.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub queue: QueueConfig,
    pub logging: LoggingConfig,
}

/// `[server]`: listen address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

/// `[queue]`: sizes of the bounded logs kept by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Processed deliveries kept, newest first.
    pub history_capacity: usize,
    /// Cancelled deliveries kept, newest first.
    pub cancelled_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            cancelled_capacity: 10,
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or filter directive. `RUST_LOG` wins when set.
    pub level: String,
    /// One JSON object per line on stdout instead of text.
    pub json: bool,
    /// Also write daily-rotated files here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            directory: None,
        }
    }
}
