//! In-memory vocabulary table for the Amis lessons

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::error::{QuizError, Result};

/// Minimum distinct items needed for one correct answer plus two distractors.
pub const MIN_ITEMS: usize = 3;

/// Slot marker inside a sentence pattern.
pub const WORD_SLOT: &str = "{word}";

/// Vocabulary entry, identified by its headword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub headword: String,
    pub translation: String,
    /// Action cue shown on the word card, e.g. "摸摸頭".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl VocabularyItem {
    pub fn new(headword: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            translation: translation.into(),
            gloss: None,
            category: None,
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_gloss(mut self, gloss: impl Into<String>) -> Self {
        self.gloss = Some(gloss.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Sentence entry, identified by its phrase.
///
/// A phrase may contain a `{word}` slot; the translation then carries the
/// same slot, and [`SentenceItem::fill`] substitutes a vocabulary item into
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceItem {
    pub phrase: String,
    pub translation: String,
}

impl SentenceItem {
    pub fn new(phrase: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            translation: translation.into(),
        }
    }

    pub fn has_slot(&self) -> bool {
        self.phrase.contains(WORD_SLOT)
    }

    /// Render the pattern with `item`: "O {word} koni." becomes "O Mata koni."
    /// and "這是{word}。" becomes "這是眼睛。".
    pub fn fill(&self, item: &VocabularyItem) -> SentenceItem {
        SentenceItem {
            phrase: self.phrase.replace(WORD_SLOT, &item.headword),
            translation: self.translation.replace(WORD_SLOT, &item.translation),
        }
    }
}

/// Word card for the learning view
#[derive(Debug, Clone, Serialize)]
pub struct WordCard {
    pub headword: String,
    pub translation: String,
    pub emoji: Option<String>,
    pub gloss: Option<String>,
    /// Text handed to the audio provider when the card's speaker is pressed.
    pub audio_text: String,
}

/// Immutable vocabulary and sentence table, created once at startup.
#[derive(Debug, Clone)]
pub struct VocabularyStore {
    items: Vec<VocabularyItem>,
    sentences: Vec<SentenceItem>,
}

impl VocabularyStore {
    /// Validate and build a store.
    ///
    /// Fails with [`QuizError::Configuration`] when a headword, translation or
    /// phrase is blank, when a headword or phrase appears twice, or when fewer
    /// than [`MIN_ITEMS`] items are present.
    pub fn new(items: Vec<VocabularyItem>, sentences: Vec<SentenceItem>) -> Result<Self> {
        let mut headwords = HashSet::new();
        for item in &items {
            if item.headword.trim().is_empty() || item.translation.trim().is_empty() {
                return Err(QuizError::Configuration(format!(
                    "Vocabulary item has a blank field: {:?}",
                    item
                )));
            }
            if !headwords.insert(item.headword.as_str()) {
                return Err(QuizError::Configuration(format!(
                    "Duplicate headword '{}'",
                    item.headword
                )));
            }
        }

        if headwords.len() < MIN_ITEMS {
            return Err(QuizError::Configuration(format!(
                "Not enough vocabulary for a quiz (need at least {}, found {})",
                MIN_ITEMS,
                headwords.len()
            )));
        }

        let mut phrases = HashSet::new();
        for sentence in &sentences {
            if sentence.phrase.trim().is_empty() || sentence.translation.trim().is_empty() {
                return Err(QuizError::Configuration(format!(
                    "Sentence has a blank field: {:?}",
                    sentence
                )));
            }
            if !phrases.insert(sentence.phrase.as_str()) {
                return Err(QuizError::Configuration(format!(
                    "Duplicate sentence '{}'",
                    sentence.phrase
                )));
            }
        }

        log::info!(
            "Loaded vocabulary store: {} items, {} sentences",
            items.len(),
            sentences.len()
        );

        Ok(Self { items, sentences })
    }

    /// The body-parts lesson: six words and the "O maan koni?" sentence patterns.
    pub fn builtin() -> Result<Self> {
        let category = "身體";
        let items = vec![
            VocabularyItem::new("Fongoh", "頭").with_emoji("🙆‍♂️").with_gloss("摸摸頭"),
            VocabularyItem::new("Mata", "眼睛").with_emoji("👀").with_gloss("眨眨眼"),
            VocabularyItem::new("Ngoso'", "鼻子").with_emoji("👃").with_gloss("指鼻子"),
            VocabularyItem::new("Tangila", "耳朵").with_emoji("👂").with_gloss("拉耳朵"),
            VocabularyItem::new("Ngoyos", "嘴巴").with_emoji("👄").with_gloss("張開嘴"),
            VocabularyItem::new("Pising", "臉頰/臉").with_emoji("😊").with_gloss("戳臉頰"),
        ]
        .into_iter()
        .map(|item| item.with_category(category))
        .collect::<Vec<_>>();

        let sentences = vec![
            SentenceItem::new("O maan koni?", "這是什麼？"),
            SentenceItem::new("O {word} koni.", "這是{word}。"),
            SentenceItem::new("Piti'en ko mata.", "閉上眼睛。"),
            SentenceItem::new("Tiyalen ko pising.", "摸摸臉頰。"),
        ];

        Self::new(items, sentences)
    }

    /// Build a store from vocabulary (and optionally sentence) files, CSV or XLSX.
    pub fn from_files(items_path: impl AsRef<Path>, sentences_path: Option<&Path>) -> Result<Self> {
        let items = crate::import::load_items(items_path.as_ref())?;
        let sentences = match sentences_path {
            Some(path) => crate::import::load_sentences(path)?,
            None => Vec::new(),
        };
        Self::new(items, sentences)
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn sentences(&self) -> &[SentenceItem] {
        &self.sentences
    }

    pub fn get(&self, headword: &str) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| item.headword == headword)
    }

    /// Distinct categories, sorted; uncategorized items are left out.
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn word_cards(&self) -> Vec<WordCard> {
        self.items
            .iter()
            .map(|item| WordCard {
                headword: item.headword.clone(),
                translation: item.translation.clone(),
                emoji: item.emoji.clone(),
                gloss: item.gloss.clone(),
                audio_text: item.headword.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_items() -> Vec<VocabularyItem> {
        vec![
            VocabularyItem::new("Fongoh", "頭"),
            VocabularyItem::new("Mata", "眼睛"),
            VocabularyItem::new("Ngoso'", "鼻子"),
        ]
    }

    #[test]
    fn test_builtin_is_valid() {
        let store = VocabularyStore::builtin().unwrap();
        assert_eq!(store.items().len(), 6);
        assert_eq!(store.sentences().len(), 4);
        assert_eq!(store.get("Tangila").unwrap().translation, "耳朵");
        assert_eq!(store.categories(), vec!["身體".to_string()]);
    }

    #[test]
    fn test_minimum_size() {
        assert!(VocabularyStore::new(three_items(), vec![]).is_ok());

        let mut two = three_items();
        two.pop();
        let err = VocabularyStore::new(two, vec![]).unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)));
    }

    #[test]
    fn test_duplicate_headword_rejected() {
        let mut items = three_items();
        items.push(VocabularyItem::new("Mata", "眼"));
        let err = VocabularyStore::new(items, vec![]).unwrap_err();
        assert!(err.to_string().contains("Duplicate headword 'Mata'"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut items = three_items();
        items.push(VocabularyItem::new("Tangila", "  "));
        assert!(VocabularyStore::new(items, vec![]).is_err());

        let sentences = vec![SentenceItem::new("", "這是什麼？")];
        assert!(VocabularyStore::new(three_items(), sentences).is_err());
    }

    #[test]
    fn test_sentence_fill() {
        let pattern = SentenceItem::new("O {word} koni.", "這是{word}。");
        assert!(pattern.has_slot());

        let filled = pattern.fill(&VocabularyItem::new("Mata", "眼睛"));
        assert_eq!(filled.phrase, "O Mata koni.");
        assert_eq!(filled.translation, "這是眼睛。");
        assert!(!filled.has_slot());
    }

    #[test]
    fn test_word_cards() {
        let cards = VocabularyStore::builtin().unwrap().word_cards();
        let fongoh = &cards[0];
        assert_eq!(fongoh.headword, "Fongoh");
        assert_eq!(fongoh.audio_text, "Fongoh");
        assert_eq!(fongoh.gloss.as_deref(), Some("摸摸頭"));
    }
}
