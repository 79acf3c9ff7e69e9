pub mod content;
pub mod item;
pub mod learning_stats;
pub mod review_log;
pub mod review_result;

pub use content::{CefrLevel, ContentRecord, Exercise, GrammarGuide, VocabularyEntry};
pub use item::SpacedRepetitionItem;
pub use learning_stats::LearningStats;
pub use review_log::ReviewLogEntry;
pub use review_result::ReviewResult;
