use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate view over a learner's item collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_items: usize,
    pub due_for_review: usize,
    pub due_soon: usize,
    /// Percentage, rounded to a whole number
    pub retention_rate: f64,
    /// Days, rounded to a whole number
    pub average_interval: f64,
    /// Rounded to two decimals
    pub average_ease_factor: f64,
    /// Earliest `next_review` among the items already due
    pub next_review_date: Option<DateTime<Utc>>,
}
