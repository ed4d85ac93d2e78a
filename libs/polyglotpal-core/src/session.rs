//! Exercise session state machine.
//!
//! ```text
//! Loading -> Answering -> Checked -> Answering (next question)
//!                                 \-> Submitted (after the last question)
//! ```
//!
//! Entering `Submitted` prepares one [`ProgressSubmission`]; it can be taken
//! exactly once with [`ExerciseSession::take_submission`]. Restarting returns to
//! the first question with a zero score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::question::{Question, Response};
use crate::scoring::{self, Outcome};
use crate::types::{ActivityType, ProgressSubmission, QuestionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Loading,
    Answering,
    Checked,
    Submitted,
}

/// Result of checking the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub correct: bool,
    pub points: u32,
    pub max_points: u32,
    pub is_last: bool,
}

/// What happened after leaving the `Checked` phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// Last question done; the submission is ready to be taken.
    Finished(Outcome),
}

#[derive(Debug)]
pub struct ExerciseSession {
    activity_type: ActivityType,
    level: i32,
    lang: String,
    questions: Vec<Question>,
    current: usize,
    phase: SessionPhase,
    score: u32,
    selection: Option<Response>,
    pending: Option<ProgressSubmission>,
}

impl ExerciseSession {
    pub fn new(activity_type: ActivityType, level: i32, lang: impl Into<String>) -> Self {
        Self {
            activity_type,
            level,
            lang: lang.into(),
            questions: Vec::new(),
            current: 0,
            phase: SessionPhase::Loading,
            score: 0,
            selection: None,
            pending: None,
        }
    }

    /// Install the fetched batch. An empty batch leaves the session loading.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<()> {
        self.expect_phase(SessionPhase::Loading, "load questions")?;
        if questions.is_empty() {
            return Err(SessionError::EmptyBatch);
        }
        let expected = self.activity_type.question_kind();
        if let Some(q) = questions.iter().find(|q| q.kind() != expected) {
            return Err(SessionError::ResponseMismatch {
                expected,
                found: q.kind(),
            });
        }
        self.questions = questions;
        self.reset();
        Ok(())
    }

    /// Replace the selected answer for the current question.
    ///
    /// A blank response clears the selection.
    pub fn select(&mut self, response: Response) -> Result<()> {
        self.ensure_answering("select an answer")?;
        let expected = self.current_kind();
        if response.kind() != expected {
            return Err(SessionError::ResponseMismatch {
                expected,
                found: response.kind(),
            });
        }
        self.selection = (!response.is_empty()).then_some(response);
        Ok(())
    }

    /// Map one source word onto a target word of the current matching group.
    pub fn select_pair(&mut self, source_id: i64, target_id: i64) -> Result<()> {
        self.ensure_answering("select a pair")?;
        let expected = self.current_kind();
        if expected != QuestionKind::Matching {
            return Err(SessionError::ResponseMismatch {
                expected,
                found: QuestionKind::Matching,
            });
        }
        match self.selection.get_or_insert_with(|| Response::Matches(BTreeMap::new())) {
            Response::Matches(matches) => {
                matches.insert(source_id, target_id);
                Ok(())
            }
            other => Err(SessionError::ResponseMismatch {
                expected: QuestionKind::Matching,
                found: other.kind(),
            }),
        }
    }

    /// Score the current selection and lock it.
    pub fn check(&mut self) -> Result<CheckResult> {
        self.ensure_answering("check")?;
        let question = &self.questions[self.current];
        let response = self
            .selection
            .as_ref()
            .filter(|r| !r.is_empty())
            .ok_or(SessionError::NoAnswerSelected)?;

        if let (Question::Matching(group), Response::Matches(matches)) = (question, response) {
            let mapped = group.pairs.iter().filter(|p| matches.contains_key(&p.id)).count();
            if mapped < group.pairs.len() {
                return Err(SessionError::IncompleteMatching {
                    mapped,
                    expected: group.pairs.len(),
                });
            }
        }

        let points = question.points(response)?;
        let max_points = question.max_points();
        self.score += points;
        self.phase = SessionPhase::Checked;

        Ok(CheckResult {
            correct: points == max_points,
            points,
            max_points,
            is_last: self.is_last(),
        })
    }

    /// Leave the `Checked` phase.
    pub fn advance(&mut self) -> Result<Advance> {
        match self.phase {
            SessionPhase::Checked => {}
            SessionPhase::Submitted => return Err(SessionError::AlreadySubmitted),
            phase => return Err(SessionError::InvalidTransition { phase, action: "advance" }),
        }

        if self.is_last() {
            self.phase = SessionPhase::Submitted;
            self.selection = None;
            self.pending = Some(self.build_submission());
            return Ok(Advance::Finished(self.outcome()));
        }

        self.current += 1;
        self.selection = None;
        self.phase = SessionPhase::Answering;
        Ok(Advance::Next(self.current))
    }

    /// Start over from the first question.
    pub fn restart(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Answering | SessionPhase::Checked => {
                self.reset();
                Ok(())
            }
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
            phase => Err(SessionError::InvalidTransition { phase, action: "restart" }),
        }
    }

    /// Fresh session over the same batch, for another attempt after submitting.
    pub fn retry(&self) -> Self {
        let mut session = Self::new(self.activity_type, self.level, self.lang.clone());
        if !self.questions.is_empty() {
            session.questions = self.questions.clone();
            session.reset();
        }
        session
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Answering | SessionPhase::Checked => self.questions.get(self.current),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&Response> {
        self.selection.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        scoring::max_score(&self.questions)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::new(self.score, self.max_score())
    }

    /// Hand over the submission of a finished session. Only the first call
    /// after entering `Submitted` returns it.
    pub fn take_submission(&mut self) -> Option<ProgressSubmission> {
        self.pending.take()
    }

    fn build_submission(&self) -> ProgressSubmission {
        let outcome = self.outcome();
        ProgressSubmission {
            activity_type: self.activity_type,
            level: self.level,
            lang: self.lang.clone(),
            score: outcome.score as i32,
            completed: outcome.completed,
        }
    }

    fn reset(&mut self) {
        self.current = 0;
        self.score = 0;
        self.selection = None;
        self.phase = SessionPhase::Answering;
    }

    fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    fn current_kind(&self) -> QuestionKind {
        self.questions[self.current].kind()
    }

    fn expect_phase(&self, phase: SessionPhase, action: &'static str) -> Result<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { phase: self.phase, action })
        }
    }

    fn ensure_answering(&self, action: &'static str) -> Result<()> {
        match self.phase {
            SessionPhase::Answering => Ok(()),
            SessionPhase::Checked => Err(SessionError::AnswerLocked),
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
            phase => Err(SessionError::InvalidTransition { phase, action }),
        }
    }
}
