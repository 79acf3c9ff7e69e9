//! Item construction and the presentational difficulty heuristic.
//!
//! Difficulty is a display signal. The interval transition never reads or
//! writes it; callers apply [`SpacedRepetitionSystem::adjust_difficulty`]
//! explicitly when they want the tag to follow the learner's performance.

use super::SpacedRepetitionSystem;
use crate::models::SpacedRepetitionItem;
use chrono::{DateTime, Utc};

pub const DEFAULT_DIFFICULTY: f64 = 2.5;
pub const MIN_DIFFICULTY: f64 = 0.0;
pub const MAX_DIFFICULTY: f64 = 5.0;

const QUALITY_STEP: f64 = 0.1;
const SPEED_STEP: f64 = 0.05;
const STREAK_STEP: f64 = 0.05;

fn clamp_difficulty(difficulty: f64) -> f64 {
    difficulty.max(MIN_DIFFICULTY).min(MAX_DIFFICULTY)
}

impl SpacedRepetitionSystem {
    /// New item with default difficulty, created now.
    pub fn create_item(&self, id: &str, word: &str, translation: &str) -> SpacedRepetitionItem {
        self.create_item_at(id, word, translation, DEFAULT_DIFFICULTY, Utc::now())
    }

    pub fn create_item_at(
        &self,
        id: &str,
        word: &str,
        translation: &str,
        difficulty: f64,
        now: DateTime<Utc>,
    ) -> SpacedRepetitionItem {
        SpacedRepetitionItem {
            id: id.to_string(),
            word: word.to_string(),
            translation: translation.to_string(),
            difficulty: clamp_difficulty(difficulty),
            repetitions: 0,
            interval: 0,
            ease_factor: self.config().initial_ease_factor,
            next_review: now,
            last_review: now,
            consecutive_correct: 0,
            consecutive_incorrect: 0,
            total_reviews: 0,
            average_response_time: 0.0,
        }
    }

    /// Suggested difficulty after a review, rounded to one decimal.
    ///
    /// Good answers, fast answers and correct streaks pull it down; poor
    /// answers, slow answers and repeated misses push it up.
    pub fn adjust_difficulty(&self, item: &SpacedRepetitionItem, quality: f64, response_time: f64) -> f64 {
        let baseline = self.config().response_time_baseline;
        let mut adjustment = 0.0;

        if quality >= 4.0 {
            adjustment -= QUALITY_STEP;
        } else if quality <= 2.0 {
            adjustment += QUALITY_STEP;
        }

        if response_time < baseline * 0.5 {
            adjustment -= SPEED_STEP;
        } else if response_time > baseline * 2.0 {
            adjustment += SPEED_STEP;
        }

        if item.consecutive_correct >= 3 {
            adjustment -= STREAK_STEP;
        } else if item.consecutive_incorrect >= 2 {
            adjustment += STREAK_STEP;
        }

        let adjusted = clamp_difficulty(item.difficulty + adjustment);
        (adjusted * 10.0).round() / 10.0
    }

    /// Copy of `item` carrying the adjusted difficulty.
    pub fn apply_difficulty(&self, item: &SpacedRepetitionItem, quality: f64, response_time: f64) -> SpacedRepetitionItem {
        SpacedRepetitionItem {
            difficulty: self.adjust_difficulty(item, quality, response_time),
            ..item.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item_defaults() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();
        let item = srs.create_item_at("w1", "cat", "gato", DEFAULT_DIFFICULTY, now);

        assert_eq!(item.repetitions, 0);
        assert_eq!(item.interval, 0);
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.total_reviews, 0);
        assert_eq!(item.consecutive_correct, 0);
        assert_eq!(item.consecutive_incorrect, 0);
        assert_eq!(item.next_review, now);
        assert_eq!(item.last_review, now);
        assert!(item.is_due(now));
    }

    #[test]
    fn test_create_item_clamps_difficulty() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();
        assert_eq!(srs.create_item_at("a", "a", "a", -2.0, now).difficulty, 0.0);
        assert_eq!(srs.create_item_at("b", "b", "b", 7.0, now).difficulty, 5.0);
    }

    #[test]
    fn test_good_fast_answer_lowers_difficulty() {
        let srs = SpacedRepetitionSystem::default();
        let item = srs.create_item("w1", "cat", "gato");
        // 2.5 - 0.1 - 0.05 = 2.35, rounded half away from zero
        assert_eq!(srs.adjust_difficulty(&item, 5.0, 1.0), 2.4);
        // quality alone
        assert_eq!(srs.adjust_difficulty(&item, 5.0, 5.0), 2.4);
    }

    #[test]
    fn test_poor_slow_answer_raises_difficulty() {
        let srs = SpacedRepetitionSystem::default();
        let mut item = srs.create_item("w1", "cat", "gato");
        item.consecutive_incorrect = 2;
        // 2.5 + 0.1 + 0.05 + 0.05
        assert_eq!(srs.adjust_difficulty(&item, 1.0, 12.0), 2.7);
    }

    #[test]
    fn test_neutral_review_keeps_difficulty() {
        let srs = SpacedRepetitionSystem::default();
        let item = srs.create_item("w1", "cat", "gato");
        assert_eq!(srs.adjust_difficulty(&item, 3.0, 5.0), 2.5);
    }

    #[test]
    fn test_correct_streak_counts() {
        let srs = SpacedRepetitionSystem::default();
        let mut item = srs.create_item("w1", "cat", "gato");
        item.consecutive_correct = 4;
        // 2.5 - 0.1 - 0.05
        assert!(srs.adjust_difficulty(&item, 4.0, 5.0) < 2.5);
    }

    #[test]
    fn test_difficulty_stays_in_range() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();

        let mut hard = srs.create_item_at("h", "h", "h", 5.0, now);
        hard.consecutive_incorrect = 5;
        assert_eq!(srs.adjust_difficulty(&hard, 0.0, 60.0), 5.0);

        let mut easy = srs.create_item_at("e", "e", "e", 0.0, now);
        easy.consecutive_correct = 5;
        assert_eq!(srs.adjust_difficulty(&easy, 5.0, 0.5), 0.0);
    }

    #[test]
    fn test_apply_difficulty_only_touches_difficulty() {
        let srs = SpacedRepetitionSystem::default();
        let mut item = srs.create_item("w1", "cat", "gato");
        item.consecutive_incorrect = 2;

        let updated = srs.apply_difficulty(&item, 1.0, 12.0);
        assert_eq!(updated.difficulty, 2.7);
        assert_eq!(updated.interval, item.interval);
        assert_eq!(updated.ease_factor, item.ease_factor);
    }
}
