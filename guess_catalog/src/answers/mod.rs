//! Answers: the tri-state answer type and historical answer statistics.

use serde::{Deserialize, Serialize};

use crate::entities::{PersonId, QuestionId};

/// An answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AnswerType {
    Yes,
    No,
    #[default]
    Unknown,
}

impl AnswerType {
    /// Whether this answer carries a yes/no signal.
    pub fn is_definite(&self) -> bool {
        !matches!(self, AnswerType::Unknown)
    }
}

impl std::fmt::Display for AnswerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AnswerType::Yes => "Yes",
            AnswerType::No => "No",
            AnswerType::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Majority answer for a pair of yes/no counts.
///
/// `Unknown` only when both counts are zero. Equal non-zero counts fall to
/// `No`.
pub fn dominant_answer(yes_count: u32, no_count: u32) -> AnswerType {
    if yes_count == 0 && no_count == 0 {
        AnswerType::Unknown
    } else if yes_count > no_count {
        AnswerType::Yes
    } else {
        AnswerType::No
    }
}

/// Historical yes/no counts for one (question, person) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStat {
    pub question_id: QuestionId,
    pub person_id: PersonId,
    #[serde(default)]
    pub yes_count: u32,
    #[serde(default)]
    pub no_count: u32,
}

impl AnswerStat {
    /// Create a statistic with the given counts.
    pub fn new(question_id: QuestionId, person_id: PersonId, yes_count: u32, no_count: u32) -> Self {
        Self {
            question_id,
            person_id,
            yes_count,
            no_count,
        }
    }

    /// The dominant answer for this pair.
    pub fn dominant(&self) -> AnswerType {
        dominant_answer(self.yes_count, self.no_count)
    }

    /// Contribution to a question's discrimination score: `+1` when yes
    /// strictly outweighs no, `-1` otherwise.
    pub fn lean(&self) -> i64 {
        if self.yes_count > self.no_count {
            1
        } else {
            -1
        }
    }
}
