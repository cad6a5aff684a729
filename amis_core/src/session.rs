//! Quiz session state machine
//!
//! A session walks forward through a fixed list of questions. Every submitted
//! answer advances it by one, right or wrong, and the score only grows. Once
//! the last question is answered the session is complete until `reset()`
//! draws a fresh set.

use serde::Serialize;
use std::sync::Arc;

use crate::config::QuizConfig;
use crate::error::{QuizError, Result};
use crate::fuzzy::{check_spelling, SpellingResult};
use crate::progress::{Attempt, AttemptStats};
use crate::questions::{QuestionGenerator, QuizQuestion};
use crate::vocabulary::VocabularyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress { current_index: usize },
    Completed,
}

/// Result of [`QuizSession::submit_answer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Always filled, so the UI can confirm a right answer or show the fix.
    pub correct_answer: String,
    pub points_awarded: u32,
    pub score: u32,
}

/// Serializable view of a session for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub current_index: usize,
    pub question_count: usize,
    pub score: u32,
    pub max_score: u32,
    pub current_question: Option<QuizQuestion>,
}

pub struct QuizSession {
    generator: QuestionGenerator,
    question_count: usize,
    reward: u32,
    max_score: u32,
    spelling_threshold: f64,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    score: u32,
    attempts: Vec<Attempt>,
}

impl QuizSession {
    pub fn new(store: Arc<VocabularyStore>, config: &QuizConfig) -> Result<Self> {
        let generator = QuestionGenerator::new(store, config.placeholder.clone());
        Self::with_generator(generator, config)
    }

    /// Build a session around a prepared generator, e.g. a seeded one.
    pub fn with_generator(mut generator: QuestionGenerator, config: &QuizConfig) -> Result<Self> {
        config.validate()?;
        let max_score = config.max_score().ok_or_else(|| {
            QuizError::Configuration("maximum score overflows".to_string())
        })?;

        let questions = generator.generate(config.question_count);
        if questions.len() != config.question_count {
            return Err(QuizError::Configuration(format!(
                "Generated {} of {} questions",
                questions.len(),
                config.question_count
            )));
        }

        log::debug!("Started quiz session with {} questions", questions.len());

        Ok(Self {
            generator,
            question_count: config.question_count,
            reward: config.reward,
            max_score,
            spelling_threshold: config.spelling_threshold,
            questions,
            current_index: 0,
            score: 0,
            attempts: Vec::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Completed
        } else {
            SessionState::InProgress {
                current_index: self.current_index,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index == self.questions.len()
    }

    pub fn current_question(&self) -> Result<&QuizQuestion> {
        self.questions.get(self.current_index).ok_or(QuizError::OutOfRange {
            index: self.current_index,
            len: self.questions.len(),
        })
    }

    /// Check `selected` against the current question and move on.
    ///
    /// Exact string comparison. A completed session returns
    /// [`QuizError::InvalidState`] and is left untouched.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerFeedback> {
        let question = match self.questions.get(self.current_index) {
            Some(q) => q,
            None => {
                return Err(QuizError::InvalidState(
                    "Quiz is complete; reset to play again".to_string(),
                ))
            }
        };

        let correct = question.is_correct(selected);
        let points_awarded = if correct { self.reward } else { 0 };
        let correct_answer = question.correct_answer.clone();
        self.attempts.push(Attempt::record(question, selected, correct));

        self.score += points_awarded;
        self.current_index += 1;

        log::debug!(
            "Answer {}/{}: correct={}, score={}",
            self.current_index,
            self.questions.len(),
            correct,
            self.score
        );

        Ok(AnswerFeedback {
            correct,
            correct_answer,
            points_awarded,
            score: self.score,
        })
    }

    /// Start over with a newly drawn set of questions.
    pub fn reset(&mut self) {
        self.questions = self.generator.generate(self.question_count);
        self.current_index = 0;
        self.score = 0;
        self.attempts.clear();
        log::debug!("Quiz session reset with {} new questions", self.questions.len());
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Fraction of questions answered, for a progress bar.
    pub fn progress(&self) -> f64 {
        self.current_index as f64 / self.questions.len() as f64
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn stats(&self) -> AttemptStats {
        AttemptStats::from_attempts(&self.attempts)
    }

    /// Prompts answered wrongly this session, in order.
    pub fn missed(&self) -> Vec<&Attempt> {
        self.attempts.iter().filter(|a| !a.is_correct).collect()
    }

    /// Check a typed headword at the session's configured threshold. Does not
    /// touch the score; the multiple-choice flow stays exact-match.
    pub fn check_spelling(&self, input: &str, expected: &str) -> SpellingResult {
        check_spelling(input, expected, self.spelling_threshold)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            current_index: self.current_index,
            question_count: self.questions.len(),
            score: self.score,
            max_score: self.max_score(),
            current_question: self.current_question().ok().cloned(),
        }
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}
