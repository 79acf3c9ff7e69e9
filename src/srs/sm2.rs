//! Interval and ease-factor transition.
//!
//! Each review moves an item through this state machine:
//! - quality >= 3 counts as a correct recall: the interval bootstraps
//!   1 day -> 6 days, then grows by the ease factor; the ease factor itself
//!   rises according to the SM-2 formula plus a streak bonus
//! - quality < 3 is a lapse: back to a 1 day interval, repetitions reset and
//!   the ease factor drops by a fixed penalty
//! - the interval is always clamped to the configured range and the ease
//!   factor never drops below its floor

use super::SpacedRepetitionSystem;
use crate::models::{ReviewResult, SpacedRepetitionItem};
use chrono::{DateTime, Duration, Utc};

/// Lowest quality that counts as a correct recall.
pub const PASSING_QUALITY: f64 = 3.0;

const STREAK_BONUS: f64 = 0.05;

/// Ease-factor change for a correct review.
///
/// `consecutive_correct` is the streak *including* the review being scored.
/// Note the result is 0.1 at perfect quality, so even flawless recalls keep
/// raising the ease factor.
pub fn ease_factor_delta(quality: f64, consecutive_correct: u32) -> f64 {
    let miss = 5.0 - quality;
    let mut delta = miss * 0.1 + (0.1 - miss * (0.08 + miss * 0.02));

    if consecutive_correct >= 3 {
        delta += STREAK_BONUS;
    }
    if consecutive_correct >= 5 {
        delta += STREAK_BONUS;
    }

    delta
}

impl SpacedRepetitionSystem {
    /// Scores one review of `item` taken at `now`.
    ///
    /// quality: 0-5 (0 = total failure, 5 = perfect instant recall). Values
    /// outside that range are not rejected; the clamps below still hold.
    /// response_time: seconds, only feeds the running average.
    pub fn calculate_next_interval(
        &self,
        item: &SpacedRepetitionItem,
        quality: f64,
        response_time: f64,
        now: DateTime<Utc>,
    ) -> ReviewResult {
        let config = self.config();
        let mut next = item.clone();

        next.total_reviews = item.total_reviews.saturating_add(1);
        next.last_review = now;
        let n = next.total_reviews as f64;
        next.average_response_time = (item.average_response_time * (n - 1.0) + response_time) / n;

        let raw_interval = if quality >= PASSING_QUALITY {
            next.consecutive_correct = item.consecutive_correct.saturating_add(1);
            next.consecutive_incorrect = 0;

            let interval = match item.repetitions {
                0 => 1.0,
                1 => 6.0,
                _ => (item.interval as f64 * item.ease_factor).round(),
            };

            let delta = ease_factor_delta(quality, next.consecutive_correct);
            next.ease_factor = (item.ease_factor + delta).max(config.min_ease_factor);
            next.repetitions = item.repetitions.saturating_add(1);
            interval
        } else {
            next.consecutive_correct = 0;
            next.consecutive_incorrect = item.consecutive_incorrect.saturating_add(1);
            next.repetitions = 0;
            next.ease_factor = (item.ease_factor - config.failure_penalty).max(config.min_ease_factor);
            config.min_interval as f64
        };

        // max/min rather than clamp: clamp passes NaN through and `as u32`
        // would turn it into 0, below the floor
        next.interval = raw_interval
            .max(config.min_interval as f64)
            .min(config.max_interval as f64) as u32;

        next.next_review = now
            .checked_add_signed(Duration::days(next.interval as i64))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let should_review = next.interval <= config.graduation_interval || quality < PASSING_QUALITY;

        tracing::debug!(
            item = %item.id,
            quality,
            interval = next.interval,
            ease_factor = next.ease_factor,
            repetitions = next.repetitions,
            "review scheduled"
        );

        ReviewResult {
            new_interval: next.interval,
            new_ease_factor: next.ease_factor,
            next_review_date: next.next_review,
            quality,
            response_time,
            should_review,
            item: next,
        }
    }

    /// Same as [`calculate_next_interval`](Self::calculate_next_interval),
    /// stamped with the current wall-clock time.
    pub fn review(&self, item: &SpacedRepetitionItem, quality: f64, response_time: f64) -> ReviewResult {
        self.calculate_next_interval(item, quality, response_time, Utc::now())
    }
}
