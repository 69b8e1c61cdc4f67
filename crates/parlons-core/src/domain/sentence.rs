//! Sentence and sentence-list types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::settings::PromptLanguage;

/// Stable sentence identifier.
pub type SentenceId = u64;

/// A single drill sentence.
///
/// The French text is what the learner tries to produce; the native and
/// secondary texts are the two prompt languages. On the wire the prompt
/// fields keep their historical `cn` / `en` keys so that exported files stay
/// compatible with older sentence packs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Unique identifier, stable across sessions.
    pub id: SentenceId,

    /// Target-language (French) text.
    pub fr: String,

    /// Native-language prompt.
    #[serde(rename = "cn")]
    pub native: String,

    /// Secondary-language prompt.
    #[serde(rename = "en")]
    pub secondary: String,

    /// Optional phonetic transcription of the French text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Lesson grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<u32>,

    /// Difficulty rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
}

impl Sentence {
    /// Create a sentence with only the required fields set.
    pub fn new(
        id: SentenceId,
        fr: impl Into<String>,
        native: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        Self {
            id,
            fr: fr.into(),
            native: native.into(),
            secondary: secondary.into(),
            phonetic: None,
            notes: None,
            lesson: None,
            difficulty: None,
        }
    }

    /// Builder-style lesson setter.
    #[must_use]
    pub const fn with_lesson(mut self, lesson: u32) -> Self {
        self.lesson = Some(lesson);
        self
    }

    /// Prompt text for the given prompt language.
    pub fn prompt_text(&self, language: PromptLanguage) -> &str {
        match language {
            PromptLanguage::Native => &self.native,
            PromptLanguage::Secondary => &self.secondary,
        }
    }

    /// Length of the French text in characters (Unicode scalar values).
    pub fn fr_char_count(&self) -> usize {
        self.fr.chars().count()
    }
}

/// An ordered, index-addressable list of sentences.
///
/// Cloning is cheap: the sentences live behind an `Arc<[Sentence]>`, so the
/// drill sequencer can hold a read-only view while the application keeps
/// its own handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceList {
    items: Arc<[Sentence]>,
}

impl SentenceList {
    /// Wrap a vector of sentences, preserving order.
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self {
            items: sentences.into(),
        }
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sentence at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.items.get(index)
    }

    /// Iterate in drill order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.items.iter()
    }

    /// Borrow the sentences as a slice.
    pub fn as_slice(&self) -> &[Sentence] {
        &self.items
    }

    /// Clamp an index into `[0, len - 1]`. Returns 0 for an empty list.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }
}

impl From<Vec<Sentence>> for SentenceList {
    fn from(sentences: Vec<Sentence>) -> Self {
        Self::new(sentences)
    }
}

impl FromIterator<Sentence> for SentenceList {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SentenceList {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: u64) -> SentenceList {
        (1..=n)
            .map(|i| Sentence::new(i, format!("fr {i}"), format!("cn {i}"), format!("en {i}")))
            .collect()
    }

    #[test]
    fn prompt_text_follows_language() {
        let s = Sentence::new(1, "Bonjour", "你好", "Hello");
        assert_eq!(s.prompt_text(PromptLanguage::Native), "你好");
        assert_eq!(s.prompt_text(PromptLanguage::Secondary), "Hello");
    }

    #[test]
    fn fr_char_count_counts_characters_not_bytes() {
        let s = Sentence::new(1, "Très", "", "");
        assert_eq!(s.fr.len(), 5);
        assert_eq!(s.fr_char_count(), 4);
    }

    #[test]
    fn clamp_index_saturates() {
        let list = list_of(3);
        assert_eq!(list.clamp_index(0), 0);
        assert_eq!(list.clamp_index(2), 2);
        assert_eq!(list.clamp_index(7), 2);
        assert_eq!(SentenceList::default().clamp_index(4), 0);
    }

    #[test]
    fn clone_shares_storage() {
        let list = list_of(2);
        let view = list.clone();
        assert_eq!(list, view);
        assert!(std::ptr::eq(list.as_slice(), view.as_slice()));
    }

    #[test]
    fn serializes_prompt_fields_with_legacy_keys() {
        let s = Sentence::new(3, "Merci", "谢谢", "Thank you");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["cn"], "谢谢");
        assert_eq!(json["en"], "Thank you");
        assert!(json.get("phonetic").is_none());
    }
}
