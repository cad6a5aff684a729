//! Error type shared by the store, generator and session

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    /// The vocabulary or quiz settings cannot produce well-formed questions.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An answer was submitted to a completed session. Recover with `reset()`.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Question index {index} out of range (session has {len} questions)")]
    OutOfRange { index: usize, len: usize },

    #[error("Import error: {0}")]
    Import(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
