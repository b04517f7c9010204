//! Session state: lifecycle states, per-session data and turn results.

use guess_catalog::{AnswerType, Person, PersonId, Question, QuestionId};
use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A guess was confirmed.
    Won,
    /// Questions ran out or the question limit was hit.
    Lost,
}

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameState {
    /// Created, nothing asked yet.
    #[default]
    Initialized,
    /// Opening question asked, no answer applied to the candidates yet.
    UninitializedPeopleSet,
    /// Asking questions or deciding to guess.
    InProgress,
    /// A guess was shown and awaits confirmation or rejection.
    Guessing,
    Finished(Outcome),
}

impl GameState {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameState::Finished(_))
    }
}

/// The user-visible result of one turn.
///
/// Serializes as `{"StepType": "...", "Question": "..."}`, with the text
/// present only for questions and guesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "StepType")]
pub enum Step {
    Question {
        #[serde(rename = "Question")]
        text: String,
    },
    Guessing {
        #[serde(rename = "Question")]
        text: String,
    },
    Victory,
    Defeat,
}

impl Step {
    /// Text to show the user, if the step asks something.
    pub fn text(&self) -> Option<&str> {
        match self {
            Step::Question { text } | Step::Guessing { text } => Some(text.as_str()),
            Step::Victory | Step::Defeat => None,
        }
    }

    /// Whether the step ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Victory | Step::Defeat)
    }
}

/// A question asked during the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuestion {
    pub question_id: QuestionId,
    pub question_text: String,
    /// What the catalogue says the answer should be.
    pub person_answer: AnswerType,
    /// What the user actually answered.
    pub user_answer: AnswerType,
}

impl GameQuestion {
    /// Start tracking a catalogue question with the given inferred answer.
    pub fn new(question: &Question, person_answer: AnswerType) -> Self {
        Self {
            question_id: question.id,
            question_text: question.text.clone(),
            person_answer,
            user_answer: AnswerType::Unknown,
        }
    }
}

/// Mutable data owned by a single session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    /// Questions asked so far, in order.
    pub question_set: Vec<GameQuestion>,
    /// People still considered.
    pub people_set: Vec<Person>,
    pub questions_asked: u32,
}

impl GameData {
    /// Create session data over an initial candidate set.
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            question_set: Vec::new(),
            people_set: people,
            questions_asked: 0,
        }
    }

    /// Whether a catalogue question was already asked.
    pub fn has_asked(&self, id: QuestionId) -> bool {
        self.question_set.iter().any(|q| q.question_id == id)
    }

    /// Whether a person is still a candidate.
    pub fn is_candidate(&self, id: PersonId) -> bool {
        self.people_set.iter().any(|p| p.id == id)
    }

    /// Append a question and count it.
    pub fn push_question(&mut self, question: GameQuestion) {
        self.question_set.push(question);
        self.questions_asked += 1;
    }

    /// The question most recently asked.
    pub fn current_question(&self) -> Option<&GameQuestion> {
        self.question_set.last()
    }

    /// Remove a candidate, returning it if it was present.
    pub fn remove_candidate(&mut self, id: PersonId) -> Option<Person> {
        let index = self.people_set.iter().position(|p| p.id == id)?;
        Some(self.people_set.remove(index))
    }
}
