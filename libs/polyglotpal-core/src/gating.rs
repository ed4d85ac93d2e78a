//! Level unlock policy.
//!
//! A level opens once the previous level of the same activity and language
//! has been completed. Level 1 is always open.

use crate::types::{ActivityType, LevelEntry, LevelStatus, ProgressRecord};

fn record_for<'a>(
    progress: &'a [ProgressRecord],
    level: i32,
    activity_type: ActivityType,
    lang: &str,
) -> Option<&'a ProgressRecord> {
    progress
        .iter()
        .find(|r| r.level == level && r.activity_type == activity_type && r.lang == lang)
}

fn is_completed(
    progress: &[ProgressRecord],
    level: i32,
    activity_type: ActivityType,
    lang: &str,
) -> bool {
    record_for(progress, level, activity_type, lang).is_some_and(|r| r.completed)
}

/// Compute the status of one level from a user's progress.
///
/// Records of other activities or languages are ignored. Gaps are taken
/// literally: a completed level 3 stays locked while level 2 is incomplete.
pub fn level_status(
    level: i32,
    progress: &[ProgressRecord],
    activity_type: ActivityType,
    lang: &str,
) -> LevelStatus {
    if level < 1 {
        return LevelStatus::Locked;
    }
    if level > 1 && !is_completed(progress, level - 1, activity_type, lang) {
        return LevelStatus::Locked;
    }
    if is_completed(progress, level, activity_type, lang) {
        LevelStatus::Completed
    } else {
        LevelStatus::Unlocked
    }
}

/// Statuses for levels `1..=level_count`.
pub fn level_statuses(
    level_count: i32,
    progress: &[ProgressRecord],
    activity_type: ActivityType,
    lang: &str,
) -> Vec<LevelEntry> {
    (1..=level_count)
        .map(|level| LevelEntry {
            level,
            status: level_status(level, progress, activity_type, lang),
        })
        .collect()
}
