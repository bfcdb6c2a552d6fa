//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the trivia API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaError {
    #[error("trivia request timed out")]
    Timeout,
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by question generators. Always swallowed by the source
/// chain, which moves on to the next candidate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("generator timed out")]
    Timeout,
    #[error("generator returned an empty response")]
    EmptyResponse,
    #[error("generator request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// The only acquisition failure surfaced to the player.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AcquisitionError {
    #[error("no questions available for topic {topic}")]
    NoQuestions { topic: String },
    #[error(transparent)]
    Trivia(#[from] TriviaError),
}

/// Errors emitted by `QuizController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("a quiz is already being prepared")]
    AcquisitionPending,
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}
