//! Amis Core - vocabulary quiz engine for introductory Amis (Pangcah) lessons
//!
//! Provides the vocabulary store, multiple-choice question generation, quiz
//! sessions, spelling checks and the audio fallback chain. Rendering is left
//! to the host application; Python hosts load it with the `python` feature.

mod audio;
mod config;
mod error;
mod fuzzy;
mod import;
mod progress;
mod questions;
mod session;
mod vocabulary;

#[cfg(feature = "python")]
mod python;

pub use audio::{slug, AudioProvider, FallbackChain, FnProvider, LocalRecordings, Silent};
pub use config::{AudioConfig, QuizConfig};
pub use error::{QuizError, Result};
pub use fuzzy::{check_spelling, SpellingResult};
pub use import::{
    detect_item_columns, detect_sentence_columns, load_items, load_sentences, ItemColumns,
    SentenceColumns,
};
pub use progress::{Attempt, AttemptStats};
pub use questions::{QuestionGenerator, QuestionKind, QuizQuestion, OPTION_COUNT};
pub use session::{AnswerFeedback, QuizSession, SessionSnapshot, SessionState};
pub use vocabulary::{SentenceItem, VocabularyItem, VocabularyStore, WordCard, MIN_ITEMS, WORD_SLOT};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Amis Core Python Module
#[cfg(feature = "python")]
#[pymodule]
fn amis_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::py_check_spelling, m)?)?;

    m.add_class::<python::PyVocabularyStore>()?;
    m.add_class::<python::PyVocabularyItem>()?;
    m.add_class::<python::PyQuizSession>()?;
    m.add_class::<python::PyQuizQuestion>()?;
    m.add_class::<python::PyAnswerFeedback>()?;
    m.add_class::<python::PySpellingResult>()?;
    m.add_class::<python::PyAttemptStats>()?;

    Ok(())
}
