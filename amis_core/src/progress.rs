//! Session-scoped attempt log and statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::questions::{QuestionKind, QuizQuestion};

/// One submitted answer
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub kind: QuestionKind,
    pub prompt: String,
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl Attempt {
    pub fn record(question: &QuizQuestion, selected: &str, is_correct: bool) -> Self {
        Self {
            kind: question.kind,
            prompt: question.prompt_text.clone(),
            selected: selected.to_string(),
            correct_answer: question.correct_answer.clone(),
            is_correct,
            answered_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttemptStats {
    pub total_attempts: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub accuracy_percent: f64,
}

impl AttemptStats {
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        let total = attempts.len();
        let correct = attempts.iter().filter(|a| a.is_correct).count();
        let accuracy = if total > 0 {
            (correct as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        AttemptStats {
            total_attempts: total,
            correct_count: correct,
            incorrect_count: total - correct,
            accuracy_percent: accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        QuizQuestion {
            kind: QuestionKind::WordToTranslation,
            prompt_text: "Tangila".to_string(),
            prompt_visual: "Tangila".to_string(),
            prompt_audio_text: Some("Tangila".to_string()),
            correct_answer: "耳朵".to_string(),
            options: vec!["鼻子".to_string(), "耳朵".to_string(), "眼睛".to_string()],
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = AttemptStats::from_attempts(&[]);
        assert_eq!(stats.total_attempts, 0);
        assert_eq!(stats.accuracy_percent, 0.0);
    }

    #[test]
    fn test_stats_accuracy() {
        let q = question();
        let attempts = vec![
            Attempt::record(&q, "耳朵", true),
            Attempt::record(&q, "鼻子", false),
            Attempt::record(&q, "耳朵", true),
            Attempt::record(&q, "耳朵", true),
        ];
        let stats = AttemptStats::from_attempts(&attempts);
        assert_eq!(stats.correct_count, 3);
        assert_eq!(stats.incorrect_count, 1);
        assert_eq!(stats.accuracy_percent, 75.0);
        assert_eq!(attempts[1].prompt, "Tangila");
    }
}
