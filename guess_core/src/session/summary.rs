//! End-of-game summary.

use guess_catalog::{AnswerType, QuestionId};
use serde::{Deserialize, Serialize};

use super::GameData;

/// One asked question with both answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub question_id: QuestionId,
    pub question_text: String,
    pub user_answer: AnswerType,
    /// The guessed person's answer after a confirmed guess, otherwise the
    /// candidates' collective answer.
    pub system_answer: AnswerType,
}

/// A definite user answer worth persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub question_id: QuestionId,
    pub answer: AnswerType,
}

/// What happened in a session: who was guessed and the full Q&A history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameSummary {
    /// Set only when a guess was confirmed.
    pub guessed_name: Option<String>,
    pub entries: Vec<SummaryEntry>,
}

impl GameSummary {
    /// Build a summary from session data.
    pub fn from_game(guessed_name: Option<String>, data: &GameData) -> Self {
        let entries = data
            .question_set
            .iter()
            .map(|q| SummaryEntry {
                question_id: q.question_id,
                question_text: q.question_text.clone(),
                user_answer: q.user_answer,
                system_answer: q.person_answer,
            })
            .collect();
        Self {
            guessed_name,
            entries,
        }
    }

    /// Questions the user answered with yes or no.
    pub fn observations(&self) -> Vec<Observation> {
        self.entries
            .iter()
            .filter(|e| e.user_answer.is_definite())
            .map(|e| Observation {
                question_id: e.question_id,
                answer: e.user_answer,
            })
            .collect()
    }

    /// Entries where the user disagreed with a definite catalogue answer.
    pub fn mismatches(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.iter().filter(|e| {
            e.user_answer.is_definite()
                && e.system_answer.is_definite()
                && e.user_answer != e.system_answer
        })
    }
}
