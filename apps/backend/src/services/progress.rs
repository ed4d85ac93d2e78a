//! Progress service: upsert and read user progress, level map and stats.
//!
//! Writes go through a single atomic upsert and are never retried here; a
//! failed write is returned to the caller, who may repeat the action.

use std::sync::Arc;

use chrono::Utc;
use polyglotpal_core::gating::level_statuses;

use crate::db::Database;
use crate::error::Result;
use crate::models::{ActivityType, LevelEntry, NewProgress, ProgressRecord, UserStats};

#[derive(Clone)]
pub struct ProgressService {
    db: Arc<Database>,
}

impl ProgressService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store the latest score and completion flag for the record's key.
    pub async fn submit(&self, progress: &NewProgress) -> Result<()> {
        self.db.upsert_progress(progress).await?;

        tracing::info!(
            user_id = progress.user_id,
            activity = %progress.activity_type,
            level = progress.level,
            lang = %progress.lang,
            score = progress.score,
            completed = progress.completed,
            "progress upserted"
        );
        Ok(())
    }

    /// Records for one activity and language, ordered by level.
    pub async fn list(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        lang: &str,
    ) -> Result<Vec<ProgressRecord>> {
        self.db
            .get_progress(user_id, activity_type, lang)
            .await?
            .iter()
            .map(|row| row.to_record())
            .collect()
    }

    /// Lock state of levels `1..=level_count`.
    pub async fn level_map(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        lang: &str,
        level_count: i32,
    ) -> Result<Vec<LevelEntry>> {
        let records = self.list(user_id, activity_type, lang).await?;
        Ok(level_statuses(level_count, &records, activity_type, lang))
    }

    pub async fn user_stats(&self, user_id: i64) -> Result<UserStats> {
        let records = self
            .db
            .get_all_progress(user_id)
            .await?
            .iter()
            .map(|row| row.to_record())
            .collect::<Result<Vec<_>>>()?;

        Ok(UserStats::from_records(&records, Utc::now()))
    }
}
