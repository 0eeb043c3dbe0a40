//! Error types for question-core.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// A persisted question that fails the storage-layer preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question content is required")]
    MissingContent,

    #[error("question topic is required")]
    MissingTopic,

    #[error("correct answer is required")]
    MissingAnswer,

    #[error("multiple choice questions must have at least 2 options, found {found}")]
    TooFewOptions { found: usize },

    #[error("invalid correct answer index for multiple choice question: {index} (options: {options})")]
    AnswerOutOfRange { index: i64, options: usize },

    #[error("multiple choice answer must be an option index")]
    AnswerNotIndex,

    #[error("difficulty must be between 1 and 5, got {0}")]
    Difficulty(u8),

    #[error("time estimate must be at least 1 minute")]
    TimeEstimate,
}

/// Errors that can occur while generating a document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no questions to export")]
    EmptyQuestionList,

    #[error("question {position} is invalid: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: ValidationError,
    },

    #[error("failed to package document: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
