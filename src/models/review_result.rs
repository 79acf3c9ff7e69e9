use super::SpacedRepetitionItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single review: the new item snapshot plus the inputs and the
/// headline numbers a caller usually wants without digging into the item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub item: SpacedRepetitionItem,
    pub quality: f64,
    pub response_time: f64,
    pub new_interval: u32,
    pub new_ease_factor: f64,
    pub next_review_date: DateTime<Utc>,
    /// False only for items that graduated to a long interval with strong recall
    pub should_review: bool,
}
