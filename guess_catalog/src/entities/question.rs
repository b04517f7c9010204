//! Question definitions.

use serde::{Deserialize, Serialize};

use super::QuestionId;

/// A yes/no question stored in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Marks questions that may open a session.
    #[serde(default)]
    pub unforgivable: bool,
}

impl Question {
    /// Create a regular question with a fresh ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: QuestionId::new(),
            text: text.into(),
            unforgivable: false,
        }
    }

    /// Create an opening question.
    pub fn opener(text: impl Into<String>) -> Self {
        Self {
            unforgivable: true,
            ..Self::new(text)
        }
    }

    /// Set the ID.
    pub fn with_id(mut self, id: QuestionId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question() {
        let question = Question::new("Is the person alive?");
        assert_eq!(question.text, "Is the person alive?");
        assert!(!question.unforgivable);
    }

    #[test]
    fn test_opener() {
        let question = Question::opener("Is the person real?");
        assert!(question.unforgivable);
    }

    #[test]
    fn test_unforgivable_defaults_on_deserialize() {
        let json = format!(r#"{{"id":"{}","text":"Is it a scientist?"}}"#, uuid::Uuid::nil());
        let question: Question = serde_json::from_str(&json).unwrap();
        assert!(!question.unforgivable);
        assert_eq!(question.id, QuestionId::from_uuid(uuid::Uuid::nil()));
    }
}
