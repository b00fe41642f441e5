//! Delivery records and priority scoring.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::category::Category;
use crate::error::QueueError;

/// Upper bound of the time bonus; shorter jobs earn up to this much.
const TIME_SCORE_CEILING: i64 = 200;

/// Compute the priority score for a delivery.
///
/// `base_score(category) + max(0, 200 - estimated_time)`, saturating at the
/// `i64` bounds.
pub fn priority_score(category: Category, estimated_time: i64) -> i64 {
    let time_score = TIME_SCORE_CEILING.saturating_sub(estimated_time).max(0);
    category.base_score().saturating_add(time_score)
}

/// A delivery held by the store.
///
/// `priority_score` is fixed when the item is enqueued and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    /// Caller-supplied identifier. Not required to be unique.
    pub id: String,
    /// Opaque destination.
    pub destination: String,
    /// Category, serialized lower-case.
    #[serde(rename = "type")]
    pub category: Category,
    /// Estimated completion time. Sign and range are not checked.
    pub estimated_time: i64,
    /// Score used to order the item within its category queue.
    pub priority_score: i64,
    /// Opaque caller timestamp, passed through untouched.
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// An inbound delivery as submitted by a caller.
///
/// Required fields are optional here so that an absent field surfaces as
/// [`QueueError::MissingField`] naming it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    /// Accepts a JSON string or number; numbers are kept as their decimal text.
    #[serde(default, deserialize_with = "scalar_id")]
    pub id: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub estimated_time: Option<i64>,
    pub timestamp: Option<Value>,
}

impl NewDelivery {
    /// Create a request with every required field set.
    pub fn new(
        id: impl Into<String>,
        destination: impl Into<String>,
        category: impl Into<String>,
        estimated_time: i64,
    ) -> Self {
        Self {
            id: Some(id.into()),
            destination: Some(destination.into()),
            category: Some(category.into()),
            estimated_time: Some(estimated_time),
            timestamp: None,
        }
    }

    /// Attach a caller timestamp.
    pub fn with_timestamp(mut self, timestamp: Value) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate the request and build the scored item.
    ///
    /// Fields are checked in wire order: `id`, `destination`, `type`,
    /// `estimatedTime`; the category is parsed only once all are present.
    pub fn into_item(self) -> Result<DeliveryItem, QueueError> {
        let id = self.id.ok_or_else(|| missing("id"))?;
        let destination = self.destination.ok_or_else(|| missing("destination"))?;
        let raw_category = self.category.ok_or_else(|| missing("type"))?;
        let estimated_time = self.estimated_time.ok_or_else(|| missing("estimatedTime"))?;

        let category: Category = raw_category.parse()?;

        Ok(DeliveryItem {
            id,
            destination,
            category,
            estimated_time,
            priority_score: priority_score(category, estimated_time),
            timestamp: self.timestamp,
        })
    }
}

fn scalar_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid type for id: expected a string or number, got {other}"
        ))),
    }
}

fn missing(field: &str) -> QueueError {
    QueueError::MissingField(field.to_string())
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
