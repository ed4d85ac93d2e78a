//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that connects on first use
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Progress Repository ===

    /// Insert or overwrite the progress row for its natural key.
    ///
    /// Single statement; concurrent writers for the same key serialize on the
    /// unique constraint and the last one wins.
    pub async fn upsert_progress(&self, progress: &NewProgress) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO progress (user_id, activity_type, level, lang, score, completed)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, activity_type, level, lang) DO UPDATE SET
                score = EXCLUDED.score,
                completed = EXCLUDED.completed,
                updated_at = NOW()
            "#,
        )
        .bind(progress.user_id)
        .bind(progress.activity_type.as_str())
        .bind(progress.level)
        .bind(&progress.lang)
        .bind(progress.score)
        .bind(progress.completed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let unknown_user = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if unknown_user {
                ApiError::validation(format!("unknown user_id {}", progress.user_id))
            } else {
                ApiError::Storage(e)
            }
        })?;

        Ok(())
    }

    /// Progress of a user for one activity and language, by level
    pub async fn get_progress(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        lang: &str,
    ) -> Result<Vec<DbProgress>> {
        let rows = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT user_id, activity_type, level, lang, score, completed, updated_at
            FROM progress
            WHERE user_id = $1 AND activity_type = $2 AND lang = $3
            ORDER BY level
            "#,
        )
        .bind(user_id)
        .bind(activity_type.as_str())
        .bind(lang)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every progress row of a user
    pub async fn get_all_progress(&self, user_id: i64) -> Result<Vec<DbProgress>> {
        let rows = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT user_id, activity_type, level, lang, score, completed, updated_at
            FROM progress
            WHERE user_id = $1
            ORDER BY activity_type, lang, level
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // === Content Repository ===

    /// Question rows of one activity for a level and language
    pub async fn get_content(
        &self,
        activity_type: ActivityType,
        level: i32,
        lang: &str,
    ) -> Result<ContentRows> {
        let rows = match activity_type {
            ActivityType::Vocabulary => ContentRows::Vocabulary(
                sqlx::query_as::<_, VocabularyRow>(
                    r#"
                    SELECT id, question_id, level, lang, source_word, target_word
                    FROM vocabulary_questions
                    WHERE level = $1 AND lang = $2
                    ORDER BY question_id, id
                    "#,
                )
                .bind(level)
                .bind(lang)
                .fetch_all(&self.pool)
                .await?,
            ),
            ActivityType::Grammar => ContentRows::Grammar(
                sqlx::query_as::<_, GrammarRow>(
                    r#"
                    SELECT id, level, lang, question, option1, option2, option3,
                           correct_answer, explanation, image_url
                    FROM grammar_questions
                    WHERE level = $1 AND lang = $2
                    ORDER BY id
                    "#,
                )
                .bind(level)
                .bind(lang)
                .fetch_all(&self.pool)
                .await?,
            ),
            ActivityType::FillInBlank => ContentRows::FillInBlank(
                sqlx::query_as::<_, FillBlankRow>(
                    r#"
                    SELECT id, level, lang, question_number, speaker_a_text, speaker_b_text,
                           option1, option2, option3, correct_answer, explanation
                    FROM fill_in_blank_questions
                    WHERE level = $1 AND lang = $2
                    ORDER BY question_number, id
                    "#,
                )
                .bind(level)
                .bind(lang)
                .fetch_all(&self.pool)
                .await?,
            ),
            ActivityType::ImageBased => ContentRows::ImageBased(
                sqlx::query_as::<_, ImageRow>(
                    r#"
                    SELECT id, level, lang, image_url, question_text,
                           option_a, option_b, option_c, correct_option
                    FROM image_questions
                    WHERE level = $1 AND lang = $2
                    ORDER BY id
                    "#,
                )
                .bind(level)
                .bind(lang)
                .fetch_all(&self.pool)
                .await?,
            ),
            ActivityType::Sentences => ContentRows::Sentences(
                sqlx::query_as::<_, SentenceRow>(
                    r#"
                    SELECT id, level, lang, target, hint
                    FROM sentences_questions
                    WHERE level = $1 AND lang = $2
                    ORDER BY id
                    "#,
                )
                .bind(level)
                .bind(lang)
                .fetch_all(&self.pool)
                .await?,
            ),
        };

        Ok(rows)
    }

    // === User Repository ===

    /// Return the user for an email, creating it on first sight
    pub async fn sync_user(&self, email: &str, name: &str) -> Result<DbUser> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
