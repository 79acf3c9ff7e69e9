//! Read-only views over a collection of items.

use super::SpacedRepetitionSystem;
use crate::models::{LearningStats, SpacedRepetitionItem};
use chrono::{DateTime, Duration, Utc};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl SpacedRepetitionSystem {
    /// Items whose next review is at or before `now`.
    pub fn items_due_for_review<'a>(
        &self,
        items: &'a [SpacedRepetitionItem],
        now: DateTime<Utc>,
    ) -> Vec<&'a SpacedRepetitionItem> {
        items.iter().filter(|item| item.is_due(now)).collect()
    }

    /// Items that are not yet due but will be within the due-soon window.
    pub fn items_due_soon<'a>(
        &self,
        items: &'a [SpacedRepetitionItem],
        now: DateTime<Utc>,
    ) -> Vec<&'a SpacedRepetitionItem> {
        let horizon = now
            .checked_add_signed(Duration::days(self.config().due_soon_days as i64))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        items
            .iter()
            .filter(|item| item.next_review > now && item.next_review <= horizon)
            .collect()
    }

    /// Share of all reviews that belong to a current correct streak, in 0.0..=1.0.
    pub fn calculate_retention_rate(&self, items: &[SpacedRepetitionItem]) -> f64 {
        let total_reviews: u64 = items.iter().map(|item| item.total_reviews as u64).sum();
        if total_reviews == 0 {
            return 0.0;
        }

        let correct: u64 = items.iter().map(|item| item.consecutive_correct as u64).sum();
        correct as f64 / total_reviews as f64
    }

    pub fn learning_stats(&self, items: &[SpacedRepetitionItem], now: DateTime<Utc>) -> LearningStats {
        let due = self.items_due_for_review(items, now);
        let due_soon = self.items_due_soon(items, now).len();

        let (average_interval, average_ease_factor) = if items.is_empty() {
            (0.0, 0.0)
        } else {
            let count = items.len() as f64;
            let intervals: f64 = items.iter().map(|item| item.interval as f64).sum();
            let eases: f64 = items.iter().map(|item| item.ease_factor).sum();
            ((intervals / count).round(), round_to(eases / count, 2))
        };

        LearningStats {
            total_items: items.len(),
            due_for_review: due.len(),
            due_soon,
            retention_rate: (self.calculate_retention_rate(items) * 100.0).round(),
            average_interval,
            average_ease_factor,
            next_review_date: due.iter().map(|item| item.next_review).min(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srs::SchedulerConfig;

    fn item_due_at(id: &str, next_review: DateTime<Utc>) -> SpacedRepetitionItem {
        let mut item = SpacedRepetitionSystem::default().create_item(id, id, id);
        item.next_review = next_review;
        item
    }

    #[test]
    fn test_due_and_due_soon_partition() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();
        let items = vec![
            item_due_at("overdue", now - Duration::days(2)),
            item_due_at("exact", now),
            item_due_at("tomorrow", now + Duration::days(1)),
            item_due_at("edge", now + Duration::days(3)),
            item_due_at("later", now + Duration::days(3) + Duration::seconds(1)),
        ];

        let due: Vec<&str> = srs.items_due_for_review(&items, now).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(due, vec!["overdue", "exact"]);

        let soon: Vec<&str> = srs.items_due_soon(&items, now).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(soon, vec!["tomorrow", "edge"]);
    }

    #[test]
    fn test_huge_due_soon_window_does_not_overflow() {
        let srs = SpacedRepetitionSystem::new(SchedulerConfig {
            due_soon_days: u32::MAX,
            ..SchedulerConfig::default()
        });
        let now = Utc::now();
        let items = vec![
            item_due_at("past", now - Duration::days(1)),
            item_due_at("far", now + Duration::days(100_000)),
        ];

        let soon = srs.items_due_soon(&items, now);
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].id, "far");
        assert_eq!(srs.learning_stats(&items, now).due_soon, 1);
    }

    #[test]
    fn test_retention_rate_empty() {
        let srs = SpacedRepetitionSystem::default();
        assert_eq!(srs.calculate_retention_rate(&[]), 0.0);

        let never_reviewed = vec![item_due_at("a", Utc::now())];
        assert_eq!(srs.calculate_retention_rate(&never_reviewed), 0.0);
    }

    #[test]
    fn test_retention_rate_ratio() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();
        let mut a = item_due_at("a", now);
        a.total_reviews = 4;
        a.consecutive_correct = 3;
        let mut b = item_due_at("b", now);
        b.total_reviews = 4;
        b.consecutive_incorrect = 2;

        assert!((srs.calculate_retention_rate(&[a, b]) - 0.375).abs() < 1e-9);
    }

    #[test]
    fn test_learning_stats() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();

        let mut a = item_due_at("a", now - Duration::days(3));
        a.interval = 6;
        a.ease_factor = 2.6;
        a.total_reviews = 3;
        a.consecutive_correct = 2;
        let mut b = item_due_at("b", now - Duration::days(1));
        b.interval = 1;
        b.ease_factor = 2.333;
        b.total_reviews = 1;
        let mut c = item_due_at("c", now + Duration::days(2));
        c.interval = 15;
        c.ease_factor = 2.5;

        let stats = srs.learning_stats(&[a, b, c], now);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.due_for_review, 2);
        assert_eq!(stats.due_soon, 1);
        assert_eq!(stats.retention_rate, 50.0);
        assert_eq!(stats.average_interval, 7.0);
        assert_eq!(stats.average_ease_factor, 2.48);
        assert_eq!(stats.next_review_date, Some(now - Duration::days(3)));
    }

    #[test]
    fn test_learning_stats_nothing_due() {
        let srs = SpacedRepetitionSystem::default();
        let now = Utc::now();

        let empty = srs.learning_stats(&[], now);
        assert_eq!(empty.total_items, 0);
        assert_eq!(empty.average_ease_factor, 0.0);
        assert_eq!(empty.next_review_date, None);

        let future = srs.learning_stats(&[item_due_at("a", now + Duration::days(10))], now);
        assert_eq!(future.due_for_review, 0);
        assert_eq!(future.next_review_date, None);
    }
}
