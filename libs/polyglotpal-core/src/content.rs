//! Question-bank rows as served by the content endpoints.
//!
//! Field names mirror the content tables exactly; clients key off them.
//! Each row type converts into the typed [`Question`] used by sessions.

use serde::{Deserialize, Serialize};

use crate::question::{ChoiceQuestion, MatchingGroup, Question, SentenceQuestion, WordPair};
use crate::types::ActivityType;

/// One word pair of a vocabulary matching group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VocabularyRow {
    pub id: i64,
    pub question_id: i64,
    pub level: i32,
    pub lang: String,
    pub source_word: String,
    pub target_word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GrammarRow {
    pub id: i64,
    pub level: i32,
    pub lang: String,
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: Option<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FillBlankRow {
    pub id: i64,
    pub level: i32,
    pub lang: String,
    pub question_number: i32,
    pub speaker_a_text: String,
    pub speaker_b_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: Option<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ImageRow {
    pub id: i64,
    pub level: i32,
    pub lang: String,
    pub image_url: Option<String>,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: Option<String>,
    pub correct_option: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SentenceRow {
    pub id: i64,
    pub level: i32,
    pub lang: String,
    pub target: String,
    pub hint: Option<String>,
}

fn options(first: String, second: String, third: Option<String>) -> Vec<String> {
    let mut options = vec![first, second];
    options.extend(third.filter(|o| !o.trim().is_empty()));
    options
}

impl From<GrammarRow> for Question {
    fn from(row: GrammarRow) -> Self {
        Question::SingleAnswer(ChoiceQuestion {
            id: row.id,
            prompt: row.question,
            context: None,
            options: options(row.option1, row.option2, row.option3),
            correct: row.correct_answer,
            explanation: row.explanation,
            image_url: row.image_url,
        })
    }
}

impl From<FillBlankRow> for Question {
    fn from(row: FillBlankRow) -> Self {
        Question::SingleAnswer(ChoiceQuestion {
            id: row.id,
            prompt: row.speaker_a_text,
            context: Some(row.speaker_b_text),
            options: options(row.option1, row.option2, row.option3),
            correct: row.correct_answer,
            explanation: row.explanation,
            image_url: None,
        })
    }
}

impl From<ImageRow> for Question {
    fn from(row: ImageRow) -> Self {
        Question::SingleAnswer(ChoiceQuestion {
            id: row.id,
            prompt: row.question_text,
            context: None,
            options: options(row.option_a, row.option_b, row.option_c),
            correct: row.correct_option,
            explanation: None,
            image_url: row.image_url,
        })
    }
}

impl From<SentenceRow> for Question {
    fn from(row: SentenceRow) -> Self {
        Question::Ordering(SentenceQuestion {
            id: row.id,
            target: row.target,
            hint: row.hint,
        })
    }
}

/// Group vocabulary rows by `question_id`, keeping first-seen order.
pub fn group_vocabulary(rows: Vec<VocabularyRow>) -> Vec<Question> {
    let mut groups: Vec<MatchingGroup> = Vec::new();
    for row in rows {
        let pair = WordPair {
            id: row.id,
            source_word: row.source_word,
            target_word: row.target_word,
        };
        match groups.iter_mut().find(|g| g.question_id == row.question_id) {
            Some(group) => group.pairs.push(pair),
            None => groups.push(MatchingGroup {
                question_id: row.question_id,
                pairs: vec![pair],
            }),
        }
    }
    groups.into_iter().map(Question::Matching).collect()
}

/// Rows of one content endpoint, tagged by activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentRows {
    Vocabulary(Vec<VocabularyRow>),
    Grammar(Vec<GrammarRow>),
    FillInBlank(Vec<FillBlankRow>),
    ImageBased(Vec<ImageRow>),
    Sentences(Vec<SentenceRow>),
}

impl ContentRows {
    pub fn activity_type(&self) -> ActivityType {
        match self {
            Self::Vocabulary(_) => ActivityType::Vocabulary,
            Self::Grammar(_) => ActivityType::Grammar,
            Self::FillInBlank(_) => ActivityType::FillInBlank,
            Self::ImageBased(_) => ActivityType::ImageBased,
            Self::Sentences(_) => ActivityType::Sentences,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Vocabulary(rows) => rows.len(),
            Self::Grammar(rows) => rows.len(),
            Self::FillInBlank(rows) => rows.len(),
            Self::ImageBased(rows) => rows.len(),
            Self::Sentences(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into the question batch of a session.
    pub fn into_questions(self) -> Vec<Question> {
        match self {
            Self::Vocabulary(rows) => group_vocabulary(rows),
            Self::Grammar(rows) => rows.into_iter().map(Question::from).collect(),
            Self::FillInBlank(rows) => rows.into_iter().map(Question::from).collect(),
            Self::ImageBased(rows) => rows.into_iter().map(Question::from).collect(),
            Self::Sentences(rows) => rows.into_iter().map(Question::from).collect(),
        }
    }
}
