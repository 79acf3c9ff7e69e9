use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted review, as stored in the review history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLogEntry {
    pub id: i64,
    pub item_id: String,
    pub quality: f64,
    pub response_time: f64,
    pub reviewed_at: DateTime<Utc>,
    /// Interval scheduled by this review
    pub interval: u32,
    pub ease_factor: f64,
}
