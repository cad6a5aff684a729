//! Python bindings for the presentation layer

use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::fuzzy::{check_spelling, SpellingResult};
use crate::progress::AttemptStats;
use crate::questions::QuizQuestion;
use crate::session::{AnswerFeedback, QuizSession};
use crate::vocabulary::{VocabularyItem, VocabularyStore};

impl From<QuizError> for PyErr {
    fn from(err: QuizError) -> PyErr {
        match err {
            QuizError::OutOfRange { .. } => PyIndexError::new_err(err.to_string()),
            QuizError::InvalidState(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[pyclass(name = "VocabularyItem")]
#[derive(Debug, Clone)]
pub struct PyVocabularyItem {
    #[pyo3(get)]
    pub headword: String,
    #[pyo3(get)]
    pub translation: String,
    #[pyo3(get)]
    pub gloss: Option<String>,
    #[pyo3(get)]
    pub category: Option<String>,
    #[pyo3(get)]
    pub emoji: Option<String>,
}

#[pymethods]
impl PyVocabularyItem {
    fn __repr__(&self) -> String {
        format!("VocabularyItem(headword='{}', translation='{}')", self.headword, self.translation)
    }
}

impl From<&VocabularyItem> for PyVocabularyItem {
    fn from(item: &VocabularyItem) -> Self {
        Self {
            headword: item.headword.clone(),
            translation: item.translation.clone(),
            gloss: item.gloss.clone(),
            category: item.category.clone(),
            emoji: item.emoji.clone(),
        }
    }
}

#[pyclass(name = "QuizQuestion")]
#[derive(Debug, Clone)]
pub struct PyQuizQuestion {
    #[pyo3(get)]
    pub kind: String,
    #[pyo3(get)]
    pub prompt_text: String,
    #[pyo3(get)]
    pub prompt_visual: String,
    #[pyo3(get)]
    pub prompt_audio_text: Option<String>,
    #[pyo3(get)]
    pub correct_answer: String,
    #[pyo3(get)]
    pub options: Vec<String>,
}

#[pymethods]
impl PyQuizQuestion {
    fn __repr__(&self) -> String {
        format!("QuizQuestion(kind='{}', prompt='{}')", self.kind, self.prompt_text)
    }
}

impl From<&QuizQuestion> for PyQuizQuestion {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            kind: q.kind.as_str().to_string(),
            prompt_text: q.prompt_text.clone(),
            prompt_visual: q.prompt_visual.clone(),
            prompt_audio_text: q.prompt_audio_text.clone(),
            correct_answer: q.correct_answer.clone(),
            options: q.options.clone(),
        }
    }
}

#[pyclass(name = "AnswerFeedback")]
#[derive(Debug, Clone)]
pub struct PyAnswerFeedback {
    #[pyo3(get)]
    pub correct: bool,
    #[pyo3(get)]
    pub correct_answer: String,
    #[pyo3(get)]
    pub points_awarded: u32,
    #[pyo3(get)]
    pub score: u32,
}

impl From<AnswerFeedback> for PyAnswerFeedback {
    fn from(f: AnswerFeedback) -> Self {
        Self {
            correct: f.correct,
            correct_answer: f.correct_answer,
            points_awarded: f.points_awarded,
            score: f.score,
        }
    }
}

#[pyclass(name = "SpellingResult")]
#[derive(Debug, Clone)]
pub struct PySpellingResult {
    #[pyo3(get)]
    pub is_correct: bool,
    #[pyo3(get)]
    pub similarity: f64,
    #[pyo3(get)]
    pub feedback: String,
}

impl From<SpellingResult> for PySpellingResult {
    fn from(r: SpellingResult) -> Self {
        Self {
            is_correct: r.is_correct,
            similarity: r.similarity,
            feedback: r.feedback,
        }
    }
}

#[pyclass(name = "AttemptStats")]
#[derive(Debug, Clone)]
pub struct PyAttemptStats {
    #[pyo3(get)]
    pub total_attempts: usize,
    #[pyo3(get)]
    pub correct_count: usize,
    #[pyo3(get)]
    pub incorrect_count: usize,
    #[pyo3(get)]
    pub accuracy_percent: f64,
}

#[pymethods]
impl PyAttemptStats {
    fn __repr__(&self) -> String {
        format!(
            "AttemptStats(total={}, correct={}, accuracy={:.1}%)",
            self.total_attempts, self.correct_count, self.accuracy_percent
        )
    }
}

impl From<AttemptStats> for PyAttemptStats {
    fn from(stats: AttemptStats) -> Self {
        Self {
            total_attempts: stats.total_attempts,
            correct_count: stats.correct_count,
            incorrect_count: stats.incorrect_count,
            accuracy_percent: stats.accuracy_percent,
        }
    }
}

#[pyclass(name = "VocabularyStore", frozen)]
pub struct PyVocabularyStore {
    inner: Arc<VocabularyStore>,
}

#[pymethods]
impl PyVocabularyStore {
    #[staticmethod]
    fn builtin() -> PyResult<Self> {
        Ok(Self {
            inner: Arc::new(VocabularyStore::builtin()?),
        })
    }

    #[staticmethod]
    #[pyo3(signature = (items_path, sentences_path=None))]
    fn from_files(items_path: PathBuf, sentences_path: Option<PathBuf>) -> PyResult<Self> {
        let store = VocabularyStore::from_files(&items_path, sentences_path.as_deref())?;
        Ok(Self {
            inner: Arc::new(store),
        })
    }

    fn items(&self) -> Vec<PyVocabularyItem> {
        self.inner.items().iter().map(PyVocabularyItem::from).collect()
    }

    /// (phrase, translation) pairs
    fn sentences(&self) -> Vec<(String, String)> {
        self.inner
            .sentences()
            .iter()
            .map(|s| (s.phrase.clone(), s.translation.clone()))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.items().len()
    }
}

#[pyclass(name = "QuizSession")]
pub struct PyQuizSession {
    inner: QuizSession,
}

#[pymethods]
impl PyQuizSession {
    #[new]
    #[pyo3(signature = (store, question_count=3, reward=100, spelling_threshold=None))]
    fn new(
        store: PyRef<'_, PyVocabularyStore>,
        question_count: usize,
        reward: u32,
        spelling_threshold: Option<f64>,
    ) -> PyResult<Self> {
        let defaults = QuizConfig::default();
        let config = QuizConfig {
            question_count,
            reward,
            spelling_threshold: spelling_threshold.unwrap_or(defaults.spelling_threshold),
            ..defaults
        };
        let inner = QuizSession::new(Arc::clone(&store.inner), &config)?;
        Ok(Self { inner })
    }

    fn current_question(&self) -> PyResult<PyQuizQuestion> {
        Ok(PyQuizQuestion::from(self.inner.current_question()?))
    }

    fn submit_answer(&mut self, selected: &str) -> PyResult<PyAnswerFeedback> {
        Ok(self.inner.submit_answer(selected)?.into())
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    #[getter]
    fn score(&self) -> u32 {
        self.inner.score()
    }

    #[getter]
    fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    #[getter]
    fn progress(&self) -> f64 {
        self.inner.progress()
    }

    fn stats(&self) -> PyAttemptStats {
        self.inner.stats().into()
    }

    fn check_spelling(&self, user_input: &str, expected: &str) -> PySpellingResult {
        self.inner.check_spelling(user_input, expected).into()
    }

    fn snapshot_json(&self) -> PyResult<String> {
        self.inner
            .snapshot_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

#[pyfunction]
#[pyo3(name = "check_spelling", signature = (user_input, expected, threshold=None))]
pub fn py_check_spelling(user_input: &str, expected: &str, threshold: Option<f64>) -> PySpellingResult {
    let threshold = threshold.unwrap_or_else(|| QuizConfig::default().spelling_threshold);
    check_spelling(user_input, expected, threshold).into()
}
