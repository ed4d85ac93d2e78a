//! End-to-end exercise flows against an in-memory backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use pretty_assertions::assert_eq;

use polyglotpal_client::{ExerciseBackend, ExerciseRunner, Result};
use polyglotpal_core::content::{SentenceRow, VocabularyRow};
use polyglotpal_core::{
    ActivityType, Advance, ContentRows, ProgressRecord, ProgressUpdate, Question, Response,
    SessionError,
};

/// Serves fixed content and records submissions as progress.
struct RecordingBackend {
    content: ContentRows,
    progress: Mutex<Vec<ProgressRecord>>,
    submissions: Mutex<Vec<ProgressUpdate>>,
}

impl RecordingBackend {
    fn new(content: ContentRows) -> Self {
        Self {
            content,
            progress: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl ExerciseBackend for RecordingBackend {
    async fn fetch_questions(&self, _: ActivityType, _: i32, _: &str) -> Result<Vec<Question>> {
        Ok(self.content.clone().into_questions())
    }

    async fn fetch_progress(
        &self,
        _: i64,
        _: ActivityType,
        _: &str,
    ) -> Result<Vec<ProgressRecord>> {
        Ok(self.progress.lock().unwrap().clone())
    }

    async fn submit_progress(&self, update: &ProgressUpdate) -> Result<()> {
        self.submissions.lock().unwrap().push(update.clone());

        let mut progress = self.progress.lock().unwrap();
        progress.retain(|r| {
            !(r.activity_type == update.activity_type
                && r.level == update.level
                && r.lang == update.lang)
        });
        progress.push(ProgressRecord {
            user_id: update.user_id,
            activity_type: update.activity_type,
            level: update.level,
            lang: update.lang.clone(),
            score: update.score,
            completed: update.completed,
            updated_at: chrono::Utc::now(),
        });
        Ok(())
    }
}

fn vocab(id: i64, question_id: i64, source: &str, target: &str) -> VocabularyRow {
    VocabularyRow {
        id,
        question_id,
        level: 1,
        lang: "trtoeng".to_string(),
        source_word: source.to_string(),
        target_word: target.to_string(),
    }
}

#[tokio::test]
async fn test_perfect_vocabulary_run_unlocks_next_level() {
    let content = ContentRows::Vocabulary(vec![
        vocab(1, 10, "elma", "apple"),
        vocab(2, 10, "su", "water"),
        vocab(3, 11, "kedi", "cat"),
    ]);
    let runner = ExerciseRunner::new(RecordingBackend::new(content), 42);

    let mut session = runner
        .start(ActivityType::Vocabulary, 1, "trtoeng")
        .await
        .unwrap();
    assert_eq!(session.max_score(), 3);

    // First group: two pairs, mapped one at a time
    session.select_pair(1, 1).unwrap();
    session.select_pair(2, 2).unwrap();
    session.check().unwrap();
    assert_eq!(session.advance().unwrap(), Advance::Next(1));

    session
        .select(Response::Matches(BTreeMap::from([(3, 3)])))
        .unwrap();
    session.check().unwrap();
    assert!(matches!(session.advance().unwrap(), Advance::Finished(_)));

    let outcome = runner.finish(&mut session).await.unwrap();
    assert!(outcome.completed);

    let levels = runner.levels(ActivityType::Vocabulary, "trtoeng").await.unwrap();
    assert_eq!(levels[0].status, polyglotpal_core::LevelStatus::Completed);
    assert_eq!(levels[1].status, polyglotpal_core::LevelStatus::Unlocked);
    assert_eq!(levels[2].status, polyglotpal_core::LevelStatus::Locked);
}

#[tokio::test]
async fn test_partial_sentence_run_reports_score_without_completion() {
    let content = ContentRows::Sentences(vec![
        SentenceRow {
            id: 1,
            level: 1,
            lang: "trtoeng".to_string(),
            target: "I like tea".to_string(),
            hint: None,
        },
        SentenceRow {
            id: 2,
            level: 1,
            lang: "trtoeng".to_string(),
            target: "She reads books".to_string(),
            hint: Some("reading".to_string()),
        },
    ]);
    let runner = ExerciseRunner::new(RecordingBackend::new(content), 42);
    let mut session = runner
        .start(ActivityType::Sentences, 1, "trtoeng")
        .await
        .unwrap();

    let words = |s: &str| s.split(' ').map(String::from).collect::<Vec<_>>();

    session.select(Response::WordOrder(words("I like tea"))).unwrap();
    assert!(session.check().unwrap().correct);
    session.advance().unwrap();

    session.select(Response::WordOrder(words("books reads She"))).unwrap();
    assert!(!session.check().unwrap().correct);
    session.advance().unwrap();

    let outcome = runner.finish(&mut session).await.unwrap();
    assert_eq!(outcome.score, 1);
    assert!(!outcome.completed);

    let submissions = runner.backend().submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].activity_type, ActivityType::Sentences);
    assert!(!submissions[0].completed);
}

#[tokio::test]
async fn test_choice_response_rejected_for_matching_question() {
    let content = ContentRows::Vocabulary(vec![vocab(1, 10, "elma", "apple")]);
    let runner = ExerciseRunner::new(RecordingBackend::new(content), 42);
    let mut session = runner
        .start(ActivityType::Vocabulary, 1, "trtoeng")
        .await
        .unwrap();

    let err = session.select(Response::Choice("apple".to_string())).unwrap_err();

    assert!(matches!(err, SessionError::ResponseMismatch { .. }));
}
