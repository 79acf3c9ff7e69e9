//! Spaced-repetition scheduling (SuperMemo-2 derivative).
//!
//! The scheduler is pure computation: every operation takes item snapshots
//! and returns new values, so a single `SpacedRepetitionSystem` can be
//! shared freely between callers.

pub mod difficulty;
pub mod queries;
pub mod sm2;

use serde::Deserialize;

pub use difficulty::DEFAULT_DIFFICULTY;
pub use sm2::ease_factor_delta;

/// Tunable constants of the scheduler. Defaults reproduce classic SM-2
/// bootstrap behavior with a one-year interval ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub initial_ease_factor: f64,
    pub min_ease_factor: f64,
    /// Days
    pub min_interval: u32,
    /// Days
    pub max_interval: u32,
    /// Ease factor lost on a failed review
    pub failure_penalty: f64,
    /// Items scheduled further out than this (in days) stop being flagged
    /// for closer tracking after a strong review
    pub graduation_interval: u32,
    /// Width of the "due soon" window, in days
    pub due_soon_days: u32,
    /// Seconds
    pub response_time_baseline: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_ease_factor: 2.5,
            min_ease_factor: 1.3,
            min_interval: 1,
            max_interval: 365,
            failure_penalty: 0.2,
            graduation_interval: 30,
            due_soon_days: 3,
            response_time_baseline: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpacedRepetitionSystem {
    config: SchedulerConfig,
}

impl SpacedRepetitionSystem {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}
