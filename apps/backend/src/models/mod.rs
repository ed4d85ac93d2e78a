//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{ApiError, Result};

// Re-export shared types from polyglotpal-core
pub use polyglotpal_core::content::{
    ContentRows, FillBlankRow, GrammarRow, ImageRow, SentenceRow, VocabularyRow,
};
pub use polyglotpal_core::types::{flag, ActivityType, LevelEntry, ProgressRecord};
pub use polyglotpal_core::UserStats;

// === Database Entity Types ===

/// Progress row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbProgress {
    pub user_id: i64,
    pub activity_type: String,
    pub level: i32,
    pub lang: String,
    pub score: i32,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl DbProgress {
    /// Convert to the shared progress record
    pub fn to_record(&self) -> Result<ProgressRecord> {
        let activity_type = ActivityType::from_str(&self.activity_type).ok_or_else(|| {
            ApiError::Internal(format!("unknown activity type in progress: {}", self.activity_type))
        })?;

        Ok(ProgressRecord {
            user_id: self.user_id,
            activity_type,
            level: self.level,
            lang: self.lang.clone(),
            score: self.score,
            completed: self.completed,
            updated_at: self.updated_at,
        })
    }
}

/// User row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Validated progress write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgress {
    pub user_id: i64,
    pub activity_type: ActivityType,
    pub level: i32,
    pub lang: String,
    pub score: i32,
    pub completed: bool,
}

// === API Request/Response Types ===

/// POST /api/progress body; every field is checked by `validate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitProgressRequest {
    pub user_id: Option<i64>,
    pub activity_type: Option<String>,
    pub level: Option<i32>,
    pub score: Option<i32>,
    #[serde(default, deserialize_with = "flag::deserialize_opt")]
    pub completed: Option<bool>,
    pub lang: Option<String>,
}

impl SubmitProgressRequest {
    pub fn validate(self) -> Result<NewProgress> {
        let user_id = self.user_id.ok_or_else(|| missing("user_id"))?;
        let activity_type = self
            .activity_type
            .as_deref()
            .ok_or_else(|| missing("activity_type"))
            .and_then(parse_activity)?;
        let level = self.level.ok_or_else(|| missing("level"))?;
        let lang = required_lang(self.lang)?;

        if level < 1 {
            return Err(ApiError::validation(format!("level must be at least 1, got {level}")));
        }
        let score = self.score.unwrap_or(0);
        if score < 0 {
            return Err(ApiError::validation(format!("score must not be negative, got {score}")));
        }

        Ok(NewProgress {
            user_id,
            activity_type,
            level,
            lang,
            score,
            completed: self.completed.unwrap_or(false),
        })
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::validation(format!("missing field {field}"))
}

/// Language query parameter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// Trimmed language code, `None` when absent or blank
pub fn normalize_lang(lang: Option<String>) -> Option<String> {
    lang.map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty())
}

/// Require a non-blank language code
pub fn required_lang(lang: Option<String>) -> Result<String> {
    normalize_lang(lang).ok_or_else(|| ApiError::validation("Missing language parameter"))
}

pub fn parse_activity(value: &str) -> Result<ActivityType> {
    ActivityType::from_str(value)
        .ok_or_else(|| ApiError::validation(format!("unknown activity type: {value}")))
}

pub fn parse_level(value: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .ok()
        .filter(|level| *level >= 1)
        .ok_or_else(|| ApiError::validation("Invalid level"))
}

pub fn parse_user_id(value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| ApiError::validation(format!("invalid user id: {value}")))
}

/// Success acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/sync-user body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncUserRequest {
    pub email: Option<String>,
}

/// User identity returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<DbUser> for UserResponse {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
