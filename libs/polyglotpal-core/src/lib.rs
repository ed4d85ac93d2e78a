//! Core PolyglotPal library shared by the backend and client applications.
//!
//! Provides:
//! - Shared types (ActivityType, ProgressRecord, LevelStatus, etc.)
//! - Question-bank rows and their typed `Question` variants
//! - Per-variant answer checking and batch scoring
//! - Level unlock policy
//! - Exercise session state machine
//! - User achievement stats

pub mod content;
pub mod error;
pub mod gating;
pub mod question;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod types;

pub use content::ContentRows;
pub use error::{Result, SessionError};
pub use gating::{level_status, level_statuses};
pub use question::{check_answer, Question, Response};
pub use scoring::{score_batch, Outcome};
pub use session::{Advance, CheckResult, ExerciseSession, SessionPhase};
pub use stats::UserStats;
pub use types::{
    ActivityType, LevelEntry, LevelStatus, ProgressRecord, ProgressSubmission, ProgressUpdate,
    QuestionKind,
};
