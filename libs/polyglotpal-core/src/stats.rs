//! Achievement figures derived from a user's progress rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ActivityType, ProgressRecord};

pub const XP_PER_POINT: i64 = 10;
pub const WORD_MASTER_THRESHOLD: i64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub lessons_completed: i64,
    pub words_learned: i64,
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub first_lesson: bool,
    pub word_master: bool,
    /// Every record was touched today or yesterday.
    pub day_streak: bool,
}

impl UserStats {
    pub fn from_records(records: &[ProgressRecord], now: DateTime<Utc>) -> Self {
        let lessons_completed = records.iter().filter(|r| r.completed).count() as i64;
        let words_learned: i64 = records
            .iter()
            .filter(|r| r.activity_type == ActivityType::Vocabulary)
            .map(|r| i64::from(r.score))
            .sum();
        let total_points: i64 = records.iter().map(|r| i64::from(r.score)).sum();
        let today = now.date_naive();

        Self {
            lessons_completed,
            words_learned,
            total_xp: total_points * XP_PER_POINT,
            first_lesson: records.iter().any(|r| r.level == 1 && r.completed),
            word_master: words_learned >= WORD_MASTER_THRESHOLD,
            day_streak: !records.is_empty()
                && records
                    .iter()
                    .all(|r| (today - r.updated_at.date_naive()).num_days() <= 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn record(
        activity_type: ActivityType,
        level: i32,
        score: i32,
        completed: bool,
        age: Duration,
    ) -> ProgressRecord {
        ProgressRecord {
            user_id: 1,
            activity_type,
            level,
            lang: "trtoeng".into(),
            score,
            completed,
            updated_at: now() - age,
        }
    }

    #[test]
    fn test_empty_progress() {
        assert_eq!(UserStats::from_records(&[], now()), UserStats::default());
    }

    #[test]
    fn test_totals() {
        let records = [
            record(ActivityType::Vocabulary, 1, 18, true, Duration::hours(2)),
            record(ActivityType::Vocabulary, 2, 10, false, Duration::hours(1)),
            record(ActivityType::Grammar, 1, 4, false, Duration::hours(20)),
        ];
        let stats = UserStats::from_records(&records, now());

        assert_eq!(stats.lessons_completed, 1);
        assert_eq!(stats.words_learned, 28);
        assert_eq!(stats.total_xp, 320);
        assert!(stats.first_lesson);
        assert!(!stats.word_master);
        assert!(stats.day_streak);
    }

    #[test]
    fn test_word_master_threshold() {
        let records = [record(ActivityType::Vocabulary, 3, 100, false, Duration::zero())];
        assert!(UserStats::from_records(&records, now()).word_master);
    }

    #[test]
    fn test_stale_record_breaks_streak() {
        let records = [
            record(ActivityType::Grammar, 1, 3, true, Duration::zero()),
            record(ActivityType::Grammar, 2, 3, true, Duration::days(3)),
        ];
        assert!(!UserStats::from_records(&records, now()).day_streak);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(UserStats::default()).unwrap();
        let keys = [
            "lessonsCompleted",
            "wordsLearned",
            "totalXP",
            "firstLesson",
            "wordMaster",
            "dayStreak",
        ];
        for key in keys {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
