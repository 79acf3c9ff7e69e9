//! Word-to-translation lookup table.
//!
//! Built once from content (or any iterator of pairs) and then handed to
//! whoever needs it; there is no global instance.

use crate::models::VocabularyEntry;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct TranslationLookup {
    entries: HashMap<String, String>,
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

impl TranslationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vocabulary<'a>(entries: impl IntoIterator<Item = &'a VocabularyEntry>) -> Self {
        entries
            .into_iter()
            .map(|entry| (entry.word.as_str(), entry.translation.as_str()))
            .collect()
    }

    /// Returns the previous translation if the word was already present.
    pub fn insert(&mut self, word: &str, translation: &str) -> Option<String> {
        self.entries.insert(normalize(word), translation.to_string())
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace.
    pub fn translate(&self, word: &str) -> Option<&str> {
        self.entries.get(&normalize(word)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for TranslationLookup {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (word, translation) in iter {
            lookup.insert(word, translation);
        }
        lookup
    }
}
