//! Error type shared by the quiz engine, the pack loader and the server.
//!
//! Engine rejections (`AlreadyRunning`, `NotRunning`, `AlreadyAnswered`,
//! `UnknownOption`) never change the run state; the session driver reports
//! them back to the client and carries on.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    // ── Pack errors ───────────────────────────────────────────────────────
    /// A quiz needs at least one question before it can be started.
    #[error("Quiz has no questions")]
    EmptyQuiz,

    /// A question must offer at least two options.
    #[error("Question {question} has {count} option(s), at least 2 are required")]
    TooFewOptions { question: usize, count: usize },

    #[error("Failed to read quiz pack '{path}': {source}")]
    PackRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Quiz pack is malformed: {0}")]
    MalformedPack(#[from] serde_json::Error),

    // ── Configuration ─────────────────────────────────────────────────────
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Engine rejections ─────────────────────────────────────────────────
    #[error("Quiz is already running")]
    AlreadyRunning,

    #[error("Quiz is not running")]
    NotRunning,

    #[error("An answer was already selected for this question")]
    AlreadyAnswered,

    #[error("'{option}' is not an option of the current question")]
    UnknownOption { option: String },
}

impl QuizError {
    /// True for the errors an engine returns when a command arrives at the
    /// wrong moment. These leave the run state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            QuizError::AlreadyRunning
                | QuizError::NotRunning
                | QuizError::AlreadyAnswered
                | QuizError::UnknownOption { .. }
        )
    }
}
