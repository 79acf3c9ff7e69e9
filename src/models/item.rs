//! A learnable unit (word or phrase) together with its scheduling state.
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item per word per learner. Reviews never mutate an item in place;
/// the scheduler hands back a fresh snapshot instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacedRepetitionItem {
    pub id: String,
    pub word: String,
    pub translation: String,
    /// 0.0 (easiest) to 5.0
    pub difficulty: f64,
    /// Correct reviews since the last lapse
    pub repetitions: u32,
    /// Days until the next review
    pub interval: u32,
    pub ease_factor: f64,
    pub next_review: DateTime<Utc>,
    pub last_review: DateTime<Utc>,
    pub consecutive_correct: u32,
    pub consecutive_incorrect: u32,
    pub total_reviews: u32,
    /// Running mean, in seconds
    pub average_response_time: f64,
}

impl SpacedRepetitionItem {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    /// True once the item has been reviewed at least once.
    pub fn is_started(&self) -> bool {
        self.total_reviews > 0
    }

    /// Checks the state an item can only reach through the scheduler:
    /// interval within 1..=365 once reviewed (0 before), ease factor at or
    /// above 1.3, difficulty within 0..=5 and at most one live streak.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(Error::InvalidItem(format!("{}: {}", self.id, reason)));

        if self.interval > MAX_INTERVAL {
            return invalid(format!("interval {} exceeds {} days", self.interval, MAX_INTERVAL));
        }
        if self.is_started() && self.interval < MIN_INTERVAL {
            return invalid(format!("interval {} on a reviewed item", self.interval));
        }
        if !(self.ease_factor >= MIN_EASE_FACTOR) {
            return invalid(format!("ease factor {} below {}", self.ease_factor, MIN_EASE_FACTOR));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return invalid(format!("difficulty {} outside 0-5", self.difficulty));
        }
        if self.consecutive_correct > 0 && self.consecutive_incorrect > 0 {
            return invalid("both streak counters are nonzero".to_string());
        }

        Ok(())
    }
}

const MIN_INTERVAL: u32 = 1;
const MAX_INTERVAL: u32 = 365;
const MIN_EASE_FACTOR: f64 = 1.3;
const MIN_DIFFICULTY: f64 = 0.0;
const MAX_DIFFICULTY: f64 = 5.0;
