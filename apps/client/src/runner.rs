//! Exercise runner: fetch a batch, drive the session, report once.

use polyglotpal_core::{
    level_statuses, ActivityType, ExerciseSession, LevelEntry, Outcome, ProgressRecord,
    ProgressUpdate, Question, SessionError, SessionPhase,
};

use crate::error::Result;

pub const DEFAULT_LEVEL_COUNT: i32 = 5;

/// Backend operations the runner needs.
#[allow(async_fn_in_trait)]
pub trait ExerciseBackend {
    async fn fetch_questions(
        &self,
        activity_type: ActivityType,
        level: i32,
        lang: &str,
    ) -> Result<Vec<Question>>;

    async fn fetch_progress(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        lang: &str,
    ) -> Result<Vec<ProgressRecord>>;

    async fn submit_progress(&self, update: &ProgressUpdate) -> Result<()>;
}

/// Runs exercises on behalf of one user.
pub struct ExerciseRunner<B> {
    backend: B,
    user_id: i64,
    level_count: i32,
}

impl<B: ExerciseBackend> ExerciseRunner<B> {
    pub fn new(backend: B, user_id: i64) -> Self {
        Self {
            backend,
            user_id,
            level_count: DEFAULT_LEVEL_COUNT,
        }
    }

    pub fn with_level_count(mut self, level_count: i32) -> Self {
        self.level_count = level_count;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Fetch a level's questions and load them into a new session.
    ///
    /// An empty level is reported as `SessionError::EmptyBatch`.
    pub async fn start(
        &self,
        activity_type: ActivityType,
        level: i32,
        lang: &str,
    ) -> Result<ExerciseSession> {
        let questions = self.backend.fetch_questions(activity_type, level, lang).await?;
        let mut session = ExerciseSession::new(activity_type, level, lang);
        session.load(questions)?;

        tracing::debug!(
            activity = %activity_type,
            level,
            lang,
            questions = session.questions().len(),
            "exercise started"
        );
        Ok(session)
    }

    /// Report a submitted session.
    ///
    /// Takes the session's submission, so a later call for the same session
    /// fails with `AlreadySubmitted` without reaching the backend. A failed
    /// submission is returned to the caller and not retried.
    pub async fn finish(&self, session: &mut ExerciseSession) -> Result<Outcome> {
        let submission = match session.take_submission() {
            Some(submission) => submission,
            None if session.phase() == SessionPhase::Submitted => {
                return Err(SessionError::AlreadySubmitted.into())
            }
            None => {
                return Err(SessionError::InvalidTransition {
                    phase: session.phase(),
                    action: "finish",
                }
                .into())
            }
        };

        let update = ProgressUpdate::new(self.user_id, submission);
        if let Err(e) = self.backend.submit_progress(&update).await {
            tracing::warn!(
                user_id = self.user_id,
                activity = %update.activity_type,
                level = update.level,
                error = %e,
                "progress submission failed"
            );
            return Err(e);
        }

        let outcome = session.outcome();
        tracing::info!(
            user_id = self.user_id,
            activity = %update.activity_type,
            level = update.level,
            score = outcome.score,
            completed = outcome.completed,
            "exercise finished"
        );
        Ok(outcome)
    }

    /// Level map for the runner's user.
    pub async fn levels(&self, activity_type: ActivityType, lang: &str) -> Result<Vec<LevelEntry>> {
        let records = self
            .backend
            .fetch_progress(self.user_id, activity_type, lang)
            .await?;
        Ok(level_statuses(self.level_count, &records, activity_type, lang))
    }
}
