//! Batch scoring and the completion rule.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::question::{Question, Response};

/// Score of a question batch against its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: u32,
    pub max_score: u32,
    pub completed: bool,
}

impl Outcome {
    /// A batch is completed only by a perfect, non-empty score.
    pub fn new(score: u32, max_score: u32) -> Self {
        Self {
            score,
            max_score,
            completed: max_score > 0 && score == max_score,
        }
    }
}

/// Maximum attainable score of a batch.
///
/// For matching groups this is the total pair count, whatever the group sizes.
pub fn max_score(questions: &[Question]) -> u32 {
    questions.iter().map(Question::max_points).sum()
}

/// Score responses against a batch; a missing response earns nothing.
pub fn score_batch(questions: &[Question], responses: &[Response]) -> Result<Outcome> {
    let mut score = 0;
    for (question, response) in questions.iter().zip(responses) {
        score += question.points(response)?;
    }
    Ok(Outcome::new(score, max_score(questions)))
}
