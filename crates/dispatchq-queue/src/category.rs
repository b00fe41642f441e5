//! Delivery categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueueError;

/// Delivery category. Each category has its own queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Urgent,
    Fragile,
    Standard,
}

impl Category {
    /// Categories in dequeue precedence order, highest first.
    pub const PRECEDENCE: [Category; 3] = [Category::Urgent, Category::Fragile, Category::Standard];

    /// Canonical lower-case name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Urgent => "urgent",
            Category::Fragile => "fragile",
            Category::Standard => "standard",
        }
    }

    /// Coarse tier contributed to the priority score.
    pub fn base_score(self) -> i64 {
        match self {
            Category::Urgent => 100,
            Category::Fragile => 75,
            Category::Standard => 50,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse. The raw input is kept in the error.
impl FromStr for Category {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urgent" => Ok(Category::Urgent),
            "fragile" => Ok(Category::Fragile),
            "standard" => Ok(Category::Standard),
            _ => Err(QueueError::InvalidCategory(s.to_string())),
        }
    }
}
