//! Error types for polyglotpal-core.

use thiserror::Error;

use crate::session::SessionPhase;
use crate::types::QuestionKind;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised while driving an exercise session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no questions available for this level")]
    EmptyBatch,

    #[error("select an answer before checking")]
    NoAnswerSelected,

    #[error("match all {expected} words before checking ({mapped} matched)")]
    IncompleteMatching { mapped: usize, expected: usize },

    #[error("answer is locked until the next question")]
    AnswerLocked,

    #[error("expected a {expected} answer, got {found}")]
    ResponseMismatch {
        expected: QuestionKind,
        found: QuestionKind,
    },

    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        phase: SessionPhase,
        action: &'static str,
    },

    #[error("session already submitted")]
    AlreadySubmitted,
}
