//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up the router against a database
//! - Helpers for creating users and seeding question banks
//!
//! # Requirements
//! Tests built on `TestContext::new` need a PostgreSQL database (set
//! DATABASE_URL). `TestContext::offline` never connects and only suits
//! requests rejected before storage is touched.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;

use polyglotpal_backend::config::Config;
use polyglotpal_backend::db::Database;
use polyglotpal_backend::models::ActivityType;
use polyglotpal_backend::{router, AppState};

/// Test context containing database connection and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        max_db_connections: 5,
        default_lang: "trtoeng".to_string(),
        level_count: 5,
    }
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::from_parts(db, test_config(&database_url))
    }

    /// Create a context whose pool never connects.
    ///
    /// Must be called inside a tokio runtime.
    pub fn offline() -> Self {
        let database_url = "postgres://localhost/polyglotpal_offline";
        let db = Database::connect_lazy(database_url, 1).expect("Failed to build lazy pool");
        Self::from_parts(db, test_config(database_url))
    }

    fn from_parts(db: Database, config: Config) -> Self {
        let state = AppState::new(db, config);
        let db = state.db.clone();
        Self {
            db,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a user with a unique email and return its id.
    pub async fn create_test_user(&self) -> i64 {
        let email = fixtures::unique_email();
        self.db
            .sync_user(&email, "tester")
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Number of stored rows for one progress key.
    pub async fn count_progress(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        level: i32,
        lang: &str,
    ) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM progress
             WHERE user_id = $1 AND activity_type = $2 AND level = $3 AND lang = $4",
        )
        .bind(user_id)
        .bind(activity_type.as_str())
        .bind(level)
        .bind(lang)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to count progress")
    }

    /// Insert a grammar question.
    pub async fn seed_grammar(&self, level: i32, lang: &str, question: &str, correct: &str) {
        sqlx::query(
            "INSERT INTO grammar_questions
                (level, lang, question, option1, option2, option3, correct_answer, explanation)
             VALUES ($1, $2, $3, 'is', 'are', 'am', $4, 'Subject agreement')",
        )
        .bind(level)
        .bind(lang)
        .bind(question)
        .bind(correct)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed grammar question");
    }

    /// Insert a vocabulary word pair.
    pub async fn seed_vocabulary(&self, question_id: i64, lang: &str, source: &str, target: &str) {
        sqlx::query(
            "INSERT INTO vocabulary_questions (question_id, level, lang, source_word, target_word)
             VALUES ($1, 1, $2, $3, $4)",
        )
        .bind(question_id)
        .bind(lang)
        .bind(source)
        .bind(target)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed vocabulary pair");
    }

    /// Insert a fill-in-the-blank dialogue line.
    pub async fn seed_fill_blank(&self, question_number: i32, lang: &str, prompt: &str) {
        sqlx::query(
            "INSERT INTO fill_in_blank_questions
                (level, lang, question_number, speaker_a_text, speaker_b_text,
                 option1, option2, option3, correct_answer)
             VALUES (1, $1, $2, $3, 'Fine, thanks.', 'are', 'is', 'am', 'are')",
        )
        .bind(lang)
        .bind(question_number)
        .bind(prompt)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed fill-in-the-blank question");
    }

    /// Insert an image question with two options.
    pub async fn seed_image(&self, lang: &str, question_text: &str, image_url: Option<&str>) {
        sqlx::query(
            "INSERT INTO image_questions
                (level, lang, image_url, question_text,
                 option_a, option_b, option_c, correct_option)
             VALUES (1, $1, $2, $3, 'apple', 'pear', NULL, 'apple')",
        )
        .bind(lang)
        .bind(image_url)
        .bind(question_text)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed image question");
    }

    /// Insert a sentence.
    pub async fn seed_sentence(&self, lang: &str, target: &str) {
        sqlx::query(
            "INSERT INTO sentences_questions (level, lang, target, hint) VALUES (1, $1, $2, NULL)",
        )
        .bind(lang)
        .bind(target)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed sentence");
    }

    /// Remove a user and its progress.
    pub async fn cleanup_user(&self, user_id: i64) {
        let _ = sqlx::query("DELETE FROM progress WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }

    /// Remove seeded content for a language.
    pub async fn cleanup_lang(&self, lang: &str) {
        for table in [
            "vocabulary_questions",
            "grammar_questions",
            "fill_in_blank_questions",
            "image_questions",
            "sentences_questions",
        ] {
            let _ = sqlx::query(&format!("DELETE FROM {table} WHERE lang = $1"))
                .bind(lang)
                .execute(self.db.pool())
                .await;
        }
    }
}
