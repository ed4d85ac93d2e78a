//! Typed questions and per-variant answer checking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::types::QuestionKind;

/// Multiple-choice question with a single correct option.
///
/// Used by grammar, fill-in-the-blank and image-based exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub id: i64,
    pub prompt: String,
    /// Secondary prompt line (the reply in a fill-in-the-blank dialogue).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub options: Vec<String>,
    pub correct: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ChoiceQuestion {
    pub fn check(&self, selected: &str) -> bool {
        selected == self.correct
    }
}

/// One source/target word pair of a matching group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub id: i64,
    pub source_word: String,
    pub target_word: String,
}

/// Group of word pairs matched together in one vocabulary question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingGroup {
    pub question_id: i64,
    pub pairs: Vec<WordPair>,
}

impl MatchingGroup {
    /// A pair is correct when the source is mapped onto its own target.
    pub fn check_pair(&self, source_id: i64, target_id: i64) -> bool {
        source_id == target_id && self.pairs.iter().any(|p| p.id == source_id)
    }

    /// Number of pairs mapped correctly.
    pub fn correct_pairs(&self, matches: &BTreeMap<i64, i64>) -> u32 {
        self.pairs
            .iter()
            .filter(|p| matches.get(&p.id).is_some_and(|&t| self.check_pair(p.id, t)))
            .count() as u32
    }

    pub fn check(&self, matches: &BTreeMap<i64, i64>) -> bool {
        self.correct_pairs(matches) as usize == self.pairs.len()
    }
}

/// Sentence to rebuild from its scrambled words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceQuestion {
    pub id: i64,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SentenceQuestion {
    /// Words offered to the user, in canonical order.
    pub fn words(&self) -> Vec<&str> {
        self.target.trim().split(' ').collect()
    }

    /// Exact-order comparison of the space-joined words with the target.
    pub fn check(&self, words: &[String]) -> bool {
        words.join(" ") == self.target.trim()
    }
}

/// Question as presented by an exercise session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    SingleAnswer(ChoiceQuestion),
    Matching(MatchingGroup),
    Ordering(SentenceQuestion),
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::SingleAnswer(_) => QuestionKind::SingleAnswer,
            Self::Matching(_) => QuestionKind::Matching,
            Self::Ordering(_) => QuestionKind::Ordering,
        }
    }

    /// Points available for this question.
    pub fn max_points(&self) -> u32 {
        match self {
            Self::Matching(group) => group.pairs.len() as u32,
            Self::SingleAnswer(_) | Self::Ordering(_) => 1,
        }
    }

    /// Points earned by a response.
    pub fn points(&self, response: &Response) -> Result<u32> {
        match (self, response) {
            (Self::SingleAnswer(q), Response::Choice(selected)) => Ok(u32::from(q.check(selected))),
            (Self::Matching(g), Response::Matches(matches)) => Ok(g.correct_pairs(matches)),
            (Self::Ordering(s), Response::WordOrder(words)) => Ok(u32::from(s.check(words))),
            _ => Err(SessionError::ResponseMismatch {
                expected: self.kind(),
                found: response.kind(),
            }),
        }
    }
}

/// User's answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Response {
    Choice(String),
    /// Source pair id to chosen target pair id.
    Matches(BTreeMap<i64, i64>),
    WordOrder(Vec<String>),
}

impl Response {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Choice(_) => QuestionKind::SingleAnswer,
            Self::Matches(_) => QuestionKind::Matching,
            Self::WordOrder(_) => QuestionKind::Ordering,
        }
    }

    /// No option picked, no pair mapped or no word placed.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Choice(selected) => selected.trim().is_empty(),
            Self::Matches(matches) => matches.is_empty(),
            Self::WordOrder(words) => words.iter().all(|w| w.trim().is_empty()),
        }
    }
}

/// Whether a response fully answers a question.
pub fn check_answer(question: &Question, response: &Response) -> Result<bool> {
    Ok(question.points(response)? == question.max_points())
}
