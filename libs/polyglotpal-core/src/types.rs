//! Core types for the PolyglotPal exercises and progress model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exercise family a progress row or question batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Vocabulary,
    Grammar,
    FillInBlank,
    ImageBased,
    Sentences,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        Self::Vocabulary,
        Self::Grammar,
        Self::FillInBlank,
        Self::ImageBased,
        Self::Sentences,
    ];

    /// Get the activity name as stored in the progress table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
            Self::FillInBlank => "fill_in_blank",
            Self::ImageBased => "image_based",
            Self::Sentences => "sentences",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vocabulary" => Some(Self::Vocabulary),
            "grammar" => Some(Self::Grammar),
            "fill_in_blank" => Some(Self::FillInBlank),
            "image_based" => Some(Self::ImageBased),
            "sentences" => Some(Self::Sentences),
            _ => None,
        }
    }

    /// Path segment of the content endpoint serving this activity's questions.
    pub fn content_path(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar_questions",
            Self::FillInBlank => "fill-blank",
            Self::ImageBased => "image_questions",
            Self::Sentences => "sentences",
        }
    }

    /// Question shape used by this activity.
    pub fn question_kind(&self) -> QuestionKind {
        match self {
            Self::Vocabulary => QuestionKind::Matching,
            Self::Grammar | Self::FillInBlank | Self::ImageBased => QuestionKind::SingleAnswer,
            Self::Sentences => QuestionKind::Ordering,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a question, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleAnswer,
    Matching,
    Ordering,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SingleAnswer => "single_answer",
            Self::Matching => "matching",
            Self::Ordering => "ordering",
        };
        f.write_str(name)
    }
}

/// Stored progress for one (user, activity, level, lang) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: i64,
    pub activity_type: ActivityType,
    pub level: i32,
    pub lang: String,
    pub score: i32,
    #[serde(deserialize_with = "flag::deserialize")]
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// Final result of an exercise session, ready to be sent for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSubmission {
    pub activity_type: ActivityType,
    pub level: i32,
    pub lang: String,
    pub score: i32,
    pub completed: bool,
}

/// Wire body of `POST /api/progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub user_id: i64,
    pub activity_type: ActivityType,
    pub level: i32,
    pub score: i32,
    #[serde(with = "flag")]
    pub completed: bool,
    pub lang: String,
}

impl ProgressUpdate {
    pub fn new(user_id: i64, submission: ProgressSubmission) -> Self {
        Self {
            user_id,
            activity_type: submission.activity_type,
            level: submission.level,
            score: submission.score,
            completed: submission.completed,
            lang: submission.lang,
        }
    }
}

/// Availability of a level for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    Locked,
    Unlocked,
    Completed,
}

/// Level number paired with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub level: i32,
    pub status: LevelStatus,
}

/// `completed` travels as `0|1` on the wire; booleans are accepted too.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Int(i64),
    }

    fn convert<E: serde::de::Error>(repr: Repr) -> Result<bool, E> {
        match repr {
            Repr::Bool(b) => Ok(b),
            Repr::Int(0) => Ok(false),
            Repr::Int(1) => Ok(true),
            Repr::Int(n) => Err(E::custom(format!("expected 0 or 1, got {n}"))),
        }
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        convert(Repr::deserialize(deserializer)?)
    }

    /// For optional request fields; pair with `#[serde(default)]`.
    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        Option::<Repr>::deserialize(deserializer)?
            .map(convert::<D::Error>)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_activity_round_trips_through_str() {
        for activity in ActivityType::ALL {
            assert_eq!(ActivityType::from_str(activity.as_str()), Some(activity));
        }
        assert_eq!(ActivityType::from_str("multiple_choice"), None);
    }

    #[test]
    fn test_activity_serde_matches_table_names() {
        let json = serde_json::to_string(&ActivityType::FillInBlank).unwrap();
        assert_eq!(json, "\"fill_in_blank\"");
        let json = serde_json::to_string(&ActivityType::ImageBased).unwrap();
        assert_eq!(json, "\"image_based\"");
    }

    #[test]
    fn test_progress_update_sends_completed_as_int() {
        let update = ProgressUpdate {
            user_id: 7,
            activity_type: ActivityType::Grammar,
            level: 2,
            score: 3,
            completed: true,
            lang: "trtoeng".to_string(),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["completed"], serde_json::json!(1));
        assert_eq!(value["activity_type"], serde_json::json!("grammar"));
    }

    #[test]
    fn test_progress_record_accepts_int_or_bool_completed() {
        let as_int = r#"{"user_id":1,"activity_type":"grammar","level":1,"lang":"trtoeng",
            "score":3,"completed":1,"updated_at":"2024-05-01T10:00:00Z"}"#;
        let as_bool = r#"{"user_id":1,"activity_type":"grammar","level":1,"lang":"trtoeng",
            "score":3,"completed":false,"updated_at":"2024-05-01T10:00:00Z"}"#;

        let record: ProgressRecord = serde_json::from_str(as_int).unwrap();
        assert!(record.completed);
        let record: ProgressRecord = serde_json::from_str(as_bool).unwrap();
        assert!(!record.completed);
    }

    #[test]
    fn test_flag_rejects_other_integers() {
        let bad = r#"{"user_id":1,"activity_type":"grammar","level":1,"score":0,
            "completed":2,"lang":"trtoeng"}"#;
        assert!(serde_json::from_str::<ProgressUpdate>(bad).is_err());
    }
}
