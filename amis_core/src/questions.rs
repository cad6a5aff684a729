//! Multiple-choice question generation for the Amis quiz

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::vocabulary::{SentenceItem, VocabularyItem, VocabularyStore};

/// Options shown per question: the correct answer plus two distractors.
pub const OPTION_COUNT: usize = 3;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Show the Amis word, pick its translation
    WordToTranslation,
    /// Show the translation (or its picture), pick the Amis word
    TranslationToWord,
    /// Hear/read an Amis sentence, pick its translation
    SentenceToTranslation,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::WordToTranslation,
        QuestionKind::TranslationToWord,
        QuestionKind::SentenceToTranslation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::WordToTranslation => "word_to_translation",
            QuestionKind::TranslationToWord => "translation_to_word",
            QuestionKind::SentenceToTranslation => "sentence_to_translation",
        }
    }
}

/// Multiple-choice question with [`OPTION_COUNT`] distinct options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub kind: QuestionKind,
    /// Source string of the prompt (headword, translation or sentence).
    pub prompt_text: String,
    /// What the UI shows large: an emoji when the item has one, else text.
    pub prompt_visual: String,
    /// Text for the audio collaborator. `None` when playing it would give the
    /// answer away.
    pub prompt_audio_text: Option<String>,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.correct_answer
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }

    /// Correct answer present exactly once, no repeated option.
    pub fn is_well_formed(&self) -> bool {
        let distinct: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        self.options.len() == OPTION_COUNT
            && distinct.len() == self.options.len()
            && distinct.contains(self.correct_answer.as_str())
    }
}

/// Where a question's target came from.
enum Target<'a> {
    Word(&'a VocabularyItem),
    Sentence(SentenceItem),
}

impl Target<'_> {
    fn key(&self) -> &str {
        match self {
            Target::Word(item) => &item.headword,
            Target::Sentence(sentence) => &sentence.phrase,
        }
    }
}

/// Draws quiz questions from a shared [`VocabularyStore`].
pub struct QuestionGenerator {
    store: Arc<VocabularyStore>,
    placeholder: String,
    rng: StdRng,
}

impl QuestionGenerator {
    pub fn new(store: Arc<VocabularyStore>, placeholder: impl Into<String>) -> Self {
        Self::with_rng(store, placeholder, StdRng::from_entropy())
    }

    /// Deterministic generator, for tests and reproducible drills.
    pub fn seeded(store: Arc<VocabularyStore>, placeholder: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(store, placeholder, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(store: Arc<VocabularyStore>, placeholder: impl Into<String>, rng: StdRng) -> Self {
        Self {
            store,
            placeholder: placeholder.into(),
            rng,
        }
    }

    pub fn store(&self) -> &Arc<VocabularyStore> {
        &self.store
    }

    /// Kinds this store can produce; sentence questions need sentences.
    pub fn available_kinds(&self) -> Vec<QuestionKind> {
        QuestionKind::ALL
            .into_iter()
            .filter(|kind| {
                *kind != QuestionKind::SentenceToTranslation || !self.store.sentences().is_empty()
            })
            .collect()
    }

    /// Generate `n` questions.
    ///
    /// Kinds are cycled from a random starting point so every available kind
    /// shows up once `n` covers them. A (kind, target) pair repeats only after
    /// every target of that kind has been used.
    pub fn generate(&mut self, n: usize) -> Vec<QuizQuestion> {
        let kinds = self.available_kinds();
        let offset = self.rng.gen_range(0..kinds.len());
        let mut used: HashMap<QuestionKind, HashSet<String>> = HashMap::new();

        let store = Arc::clone(&self.store);
        let sentence_groups = sentence_instances(&store);

        let mut questions = Vec::with_capacity(n);
        for i in 0..n {
            let kind = kinds[(offset + i) % kinds.len()];
            let used_for_kind = used.entry(kind).or_default();

            let target = match kind {
                QuestionKind::WordToTranslation | QuestionKind::TranslationToWord => {
                    Target::Word(self.pick_word(&store, used_for_kind))
                }
                QuestionKind::SentenceToTranslation => {
                    Target::Sentence(self.pick_sentence(&sentence_groups, used_for_kind))
                }
            };
            used_for_kind.insert(target.key().to_string());

            let question = self.build_question(kind, &target, &store, &sentence_groups);
            debug_assert!(question.is_well_formed());
            questions.push(question);
        }

        log::debug!("Generated {} questions from {} kinds", questions.len(), kinds.len());
        questions
    }

    fn pick_word<'a>(
        &mut self,
        store: &'a VocabularyStore,
        used: &mut HashSet<String>,
    ) -> &'a VocabularyItem {
        let mut fresh: Vec<&VocabularyItem> = store
            .items()
            .iter()
            .filter(|item| !used.contains(&item.headword))
            .collect();
        if fresh.is_empty() {
            used.clear();
            fresh = store.items().iter().collect();
        }
        // The store guarantees at least MIN_ITEMS items.
        fresh[self.rng.gen_range(0..fresh.len())]
    }

    fn pick_sentence(&mut self, groups: &[Vec<SentenceItem>], used: &mut HashSet<String>) -> SentenceItem {
        let mut open: Vec<&Vec<SentenceItem>> = groups
            .iter()
            .filter(|group| group.iter().any(|s| !used.contains(&s.phrase)))
            .collect();
        if open.is_empty() {
            used.clear();
            open = groups.iter().collect();
        }

        // Pattern first, then the word filling its slot, so a single slotted
        // pattern does not crowd out the plain sentences.
        let group = open[self.rng.gen_range(0..open.len())];
        let fresh: Vec<&SentenceItem> = group.iter().filter(|s| !used.contains(&s.phrase)).collect();
        fresh[self.rng.gen_range(0..fresh.len())].clone()
    }

    fn build_question(
        &mut self,
        kind: QuestionKind,
        target: &Target<'_>,
        store: &VocabularyStore,
        sentence_groups: &[Vec<SentenceItem>],
    ) -> QuizQuestion {
        let (prompt_text, prompt_visual, prompt_audio_text, correct_answer, pool): (
            String,
            String,
            Option<String>,
            String,
            Vec<&str>,
        ) = match (kind, target) {
            (QuestionKind::WordToTranslation, Target::Word(item)) => (
                item.headword.clone(),
                item.headword.clone(),
                Some(item.headword.clone()),
                item.translation.clone(),
                store.items().iter().map(|i| i.translation.as_str()).collect(),
            ),
            (QuestionKind::TranslationToWord, Target::Word(item)) => (
                item.translation.clone(),
                item.emoji.clone().unwrap_or_else(|| item.translation.clone()),
                None,
                item.headword.clone(),
                // Another headword sharing this translation would also be right.
                store
                    .items()
                    .iter()
                    .filter(|i| i.translation != item.translation)
                    .map(|i| i.headword.as_str())
                    .collect(),
            ),
            (_, Target::Sentence(sentence)) => (
                sentence.phrase.clone(),
                sentence.phrase.clone(),
                Some(sentence.phrase.clone()),
                sentence.translation.clone(),
                sentence_groups
                    .iter()
                    .flatten()
                    .filter(|s| s.phrase != sentence.phrase)
                    .map(|s| s.translation.as_str())
                    .collect(),
            ),
            (_, Target::Word(item)) => unreachable!("word target {} for {:?}", item.headword, kind),
        };

        let distractors = self.pick_distractors(&correct_answer, pool);

        let mut options = Vec::with_capacity(OPTION_COUNT);
        options.push(correct_answer.clone());
        options.extend(distractors);
        options.shuffle(&mut self.rng);

        QuizQuestion {
            kind,
            prompt_text,
            prompt_visual,
            prompt_audio_text,
            correct_answer,
            options,
        }
    }

    /// Sample distinct distractors from `pool`, padding with placeholders when
    /// the pool is too small.
    fn pick_distractors(&mut self, correct: &str, pool: Vec<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let candidates: Vec<&str> = pool
            .into_iter()
            .filter(|s| *s != correct && seen.insert(*s))
            .collect();

        let mut distractors: Vec<String> = candidates
            .choose_multiple(&mut self.rng, DISTRACTOR_COUNT)
            .map(|s| s.to_string())
            .collect();

        if distractors.len() < DISTRACTOR_COUNT {
            log::warn!(
                "Only {} distinct distractors for '{}', padding with '{}'",
                distractors.len(),
                correct,
                self.placeholder
            );
            let mut n = 1;
            while distractors.len() < DISTRACTOR_COUNT {
                let candidate = if n == 1 {
                    self.placeholder.clone()
                } else {
                    format!("{} {}", self.placeholder, n)
                };
                if candidate != correct && !distractors.contains(&candidate) {
                    distractors.push(candidate);
                }
                n += 1;
            }
        }

        distractors
    }
}

/// Every renderable sentence, grouped by pattern. A slotted pattern expands to
/// one sentence per vocabulary item.
fn sentence_instances(store: &VocabularyStore) -> Vec<Vec<SentenceItem>> {
    store
        .sentences()
        .iter()
        .map(|sentence| {
            if sentence.has_slot() {
                store.items().iter().map(|item| sentence.fill(item)).collect()
            } else {
                vec![sentence.clone()]
            }
        })
        .collect()
}
