//! Quiz settings, loadable from TOML

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{QuizError, Result};
use crate::fuzzy::{check_spelling, SpellingResult};

/// Settings for a quiz session and its audio lookup.
///
/// Every field has a default, so an empty TOML document yields
/// `QuizConfig::default()`:
///
/// ```toml
/// question_count = 5
/// reward = 100
///
/// [audio]
/// recordings_dir = "assets/audio"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions per session.
    pub question_count: usize,
    /// Points awarded for each correct answer.
    pub reward: u32,
    /// Distractor text used when the pool runs out of distinct answers.
    pub placeholder: String,
    /// Similarity needed for a typed answer to count, see [`crate::check_spelling`].
    pub spelling_threshold: f64,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub recordings_dir: Option<PathBuf>,
    pub extensions: Vec<String>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: 3,
            reward: 100,
            placeholder: "(other)".to_string(),
            spelling_threshold: 0.8,
            audio: AudioConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            recordings_dir: None,
            extensions: vec!["mp3".to_string(), "wav".to_string(), "ogg".to_string()],
        }
    }
}

impl QuizConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: QuizConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loading quiz config from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Spelling check at this config's threshold.
    pub fn check_spelling(&self, input: &str, expected: &str) -> SpellingResult {
        check_spelling(input, expected, self.spelling_threshold)
    }

    /// Score for a perfect session, `None` if it does not fit in a `u32`.
    pub fn max_score(&self) -> Option<u32> {
        u32::try_from(self.question_count)
            .ok()
            .and_then(|count| self.reward.checked_mul(count))
    }

    /// Reject settings under which a session could not be built.
    pub fn validate(&self) -> Result<()> {
        if self.question_count == 0 {
            return Err(QuizError::Configuration(
                "question_count must be at least 1".to_string(),
            ));
        }
        if self.reward == 0 {
            return Err(QuizError::Configuration("reward must be positive".to_string()));
        }
        if self.max_score().is_none() {
            return Err(QuizError::Configuration(format!(
                "{} questions worth {} points each overflow the score",
                self.question_count, self.reward
            )));
        }
        if self.placeholder.trim().is_empty() {
            return Err(QuizError::Configuration("placeholder must not be blank".to_string()));
        }
        if !(0.0..=1.0).contains(&self.spelling_threshold) {
            return Err(QuizError::Configuration(format!(
                "spelling_threshold must be within 0..=1, got {}",
                self.spelling_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = QuizConfig::from_toml_str("").unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.question_count, 3);
        assert_eq!(config.reward, 100);
        assert_eq!(config.placeholder, "(other)");
    }

    #[test]
    fn test_partial_overrides() {
        let config = QuizConfig::from_toml_str(
            r#"
            question_count = 5

            [audio]
            recordings_dir = "assets/audio"
            "#,
        )
        .unwrap();

        assert_eq!(config.question_count, 5);
        assert_eq!(config.reward, 100);
        assert_eq!(config.audio.recordings_dir, Some(PathBuf::from("assets/audio")));
        assert_eq!(config.audio.extensions.len(), 3);
    }

    #[test]
    fn test_zero_questions_rejected() {
        let err = QuizConfig::from_toml_str("question_count = 0").unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)));
    }

    #[test]
    fn test_overflowing_max_score_rejected() {
        let config = QuizConfig {
            question_count: 2,
            reward: u32::MAX,
            ..QuizConfig::default()
        };
        assert_eq!(config.max_score(), None);
        assert!(matches!(config.validate(), Err(QuizError::Configuration(_))));

        let config = QuizConfig {
            question_count: 1,
            reward: u32::MAX,
            ..QuizConfig::default()
        };
        assert_eq!(config.max_score(), Some(u32::MAX));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spelling_threshold_applies() {
        let strict = QuizConfig::from_toml_str("spelling_threshold = 1.0").unwrap();
        assert!(!strict.check_spelling("Tangla", "Tangila").is_correct);
        assert!(strict.check_spelling("tangila", "Tangila").is_correct);

        assert!(QuizConfig::default().check_spelling("Tangla", "Tangila").is_correct);
    }

    #[test]
    fn test_malformed_toml() {
        let err = QuizConfig::from_toml_str("reward = \"lots\"").unwrap_err();
        assert!(matches!(err, QuizError::Config(_)));
    }
}
