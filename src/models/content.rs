//! Typed learning content: vocabulary, grammar guides and exercises.
//!
//! Content is authored as a JSON array where each record carries a `kind`
//! tag, e.g. `{"kind": "vocabulary", "id": "v1", "word": "cat", ...}`.

use super::SpacedRepetitionItem;
use crate::srs::SpacedRepetitionSystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CEFR proficiency level
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,
    pub translation: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: f64,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

fn default_difficulty() -> f64 {
    2.5
}

impl VocabularyEntry {
    /// Builds a fresh scheduler item for this word.
    pub fn to_item(&self, srs: &SpacedRepetitionSystem, now: DateTime<Utc>) -> SpacedRepetitionItem {
        srs.create_item_at(&self.id, &self.word, &self.translation, self.difficulty, now)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarGuide {
    pub id: String,
    pub title: String,
    pub level: CefrLevel,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Multiple-choice exercise
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Exercise {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer_index && choice < self.choices.len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRecord {
    Vocabulary(VocabularyEntry),
    Grammar(GrammarGuide),
    Exercise(Exercise),
}

impl ContentRecord {
    pub fn id(&self) -> &str {
        match self {
            Self::Vocabulary(v) => &v.id,
            Self::Grammar(g) => &g.id,
            Self::Exercise(e) => &e.id,
        }
    }

    pub fn as_vocabulary(&self) -> Option<&VocabularyEntry> {
        match self {
            Self::Vocabulary(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"[
  {"kind": "vocabulary", "id": "v1", "word": "cat", "translation": "gato", "partOfSpeech": "noun"},
  {"kind": "grammar", "id": "g1", "title": "Present simple", "level": "A1", "explanation": "Habits and facts."},
  {"kind": "exercise", "id": "e1", "prompt": "She ___ coffee.", "choices": ["drink", "drinks"], "answerIndex": 1}
]"#;

    #[test]
    fn test_parse_tagged_records() {
        let records: Vec<ContentRecord> = serde_json::from_str(CONTENT).unwrap();
        assert_eq!(records.len(), 3);

        let vocab = records[0].as_vocabulary().unwrap();
        assert_eq!(vocab.word, "cat");
        assert_eq!(vocab.difficulty, 2.5);
        assert_eq!(vocab.part_of_speech.as_deref(), Some("noun"));

        match &records[1] {
            ContentRecord::Grammar(g) => assert_eq!(g.level, CefrLevel::A1),
            other => panic!("expected grammar, got {:?}", other),
        }
        assert_eq!(records[2].id(), "e1");
        assert!(records[2].as_vocabulary().is_none());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<Vec<ContentRecord>, _> =
            serde_json::from_str(r#"[{"kind": "podcast", "id": "p1"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_exercise_answer_check() {
        let exercise = Exercise {
            id: "e1".to_string(),
            prompt: "She ___ coffee.".to_string(),
            choices: vec!["drink".to_string(), "drinks".to_string()],
            answer_index: 1,
            explanation: None,
        };
        assert!(exercise.is_correct(1));
        assert!(!exercise.is_correct(0));
        assert!(!exercise.is_correct(5));
    }

    #[test]
    fn test_vocabulary_to_item() {
        let entry = VocabularyEntry {
            id: "v1".to_string(),
            word: "cat".to_string(),
            translation: "gato".to_string(),
            difficulty: 9.0,
            part_of_speech: None,
            examples: Vec::new(),
        };
        let now = Utc::now();
        let item = entry.to_item(&SpacedRepetitionSystem::default(), now);

        assert_eq!(item.id, "v1");
        assert_eq!(item.difficulty, 5.0);
        assert_eq!(item.next_review, now);
    }
}
