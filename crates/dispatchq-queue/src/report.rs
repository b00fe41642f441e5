//! Reports over processed deliveries.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::delivery::DeliveryItem;
use crate::error::QueueError;

/// Report ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSort {
    /// Highest priority score first.
    #[default]
    Priority,
    /// Shortest estimated time first.
    EstimatedTime,
}

impl FromStr for ReportSort {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(ReportSort::Priority),
            "estimated_time" | "estimatedTime" => Ok(ReportSort::EstimatedTime),
            _ => Err(QueueError::InvalidSort(s.to_string())),
        }
    }
}

/// Summary of processed deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    /// Category filter, if any.
    pub filter: Option<Category>,
    pub sort: ReportSort,
    pub count: usize,
    /// Mean priority score of the selection (0 when empty).
    pub average_priority_score: f64,
    pub deliveries: Vec<DeliveryItem>,
}

impl DeliveryReport {
    /// Build a report from history entries. Sorting is stable, so entries
    /// that tie keep their history order (newest first).
    pub fn build<'a>(
        history: impl IntoIterator<Item = &'a DeliveryItem>,
        filter: Option<Category>,
        sort: ReportSort,
    ) -> Self {
        let mut deliveries: Vec<DeliveryItem> = history
            .into_iter()
            .filter(|item| filter.is_none_or(|category| item.category == category))
            .cloned()
            .collect();

        match sort {
            ReportSort::Priority => {
                deliveries.sort_by(|a, b| b.priority_score.cmp(&a.priority_score))
            }
            ReportSort::EstimatedTime => deliveries.sort_by_key(|item| item.estimated_time),
        }

        let average_priority_score = if deliveries.is_empty() {
            0.0
        } else {
            let sum: f64 = deliveries.iter().map(|item| item.priority_score as f64).sum();
            sum / deliveries.len() as f64
        };

        Self {
            filter,
            sort,
            count: deliveries.len(),
            average_priority_score,
            deliveries,
        }
    }
}
