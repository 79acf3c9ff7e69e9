pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod srs;
pub mod translation;

pub use error::{Error, Result};
pub use models::{ContentRecord, LearningStats, ReviewResult, SpacedRepetitionItem};
pub use srs::{SchedulerConfig, SpacedRepetitionSystem};
pub use translation::TranslationLookup;
