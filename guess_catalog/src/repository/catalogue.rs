//! In-memory catalogue backing the repository trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Repository;
use crate::answers::AnswerStat;
use crate::entities::{Person, PersonId, Question, QuestionId};

/// Errors raised while loading a catalogue.
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Malformed catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Answer statistic refers to unknown question {0}")]
    UnknownQuestion(QuestionId),

    #[error("Answer statistic refers to unknown person {0}")]
    UnknownPerson(PersonId),

    #[error("Person {0} has more correct answers than occurrences")]
    InconsistentCounts(PersonId),
}

/// A fully loaded set of people, questions and answer statistics.
///
/// Items keep their insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    answers: Vec<AnswerStat>,
}

impl Catalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalogue from JSON and check its references.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let catalogue: Catalogue = serde_json::from_str(json)?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Serialize the catalogue to pretty JSON.
    pub fn to_json(&self) -> Result<String, CatalogueError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every person's counters are consistent and every
    /// statistic points at a known question and person.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        if let Some(person) = self.people.iter().find(|p| !p.has_consistent_counts()) {
            return Err(CatalogueError::InconsistentCounts(person.id));
        }
        for stat in &self.answers {
            if !self.questions.iter().any(|q| q.id == stat.question_id) {
                return Err(CatalogueError::UnknownQuestion(stat.question_id));
            }
            if !self.people.iter().any(|p| p.id == stat.person_id) {
                return Err(CatalogueError::UnknownPerson(stat.person_id));
            }
        }
        Ok(())
    }

    /// Add a person and return its ID.
    pub fn add_person(&mut self, person: Person) -> PersonId {
        let id = person.id;
        self.people.push(person);
        id
    }

    /// Add a question and return its ID.
    pub fn add_question(&mut self, question: Question) -> QuestionId {
        let id = question.id;
        self.questions.push(question);
        id
    }

    /// Record historical counts for a (question, person) pair, replacing any
    /// previous entry for the same pair.
    pub fn set_answer(&mut self, question_id: QuestionId, person_id: PersonId, yes_count: u32, no_count: u32) {
        let stat = AnswerStat::new(question_id, person_id, yes_count, no_count);
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id && a.person_id == person_id)
        {
            Some(existing) => *existing = stat,
            None => self.answers.push(stat),
        }
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl Repository for Catalogue {
    fn questions(&self, predicate: &dyn Fn(&Question) -> bool) -> Vec<Question> {
        self.questions.iter().filter(|q| predicate(q)).cloned().collect()
    }

    fn answers(&self, predicate: &dyn Fn(&AnswerStat) -> bool) -> Vec<AnswerStat> {
        self.answers.iter().filter(|a| predicate(a)).copied().collect()
    }

    fn people(&self) -> Vec<Person> {
        self.people.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Catalogue, PersonId, QuestionId, QuestionId) {
        let mut catalogue = Catalogue::new();
        let person = catalogue.add_person(Person::new("Marie Curie"));
        let opener = catalogue.add_question(Question::opener("Is the person real?"));
        let regular = catalogue.add_question(Question::new("Did the person win a Nobel prize?"));
        catalogue.set_answer(regular, person, 9, 1);
        (catalogue, person, opener, regular)
    }

    #[test]
    fn test_questions_filter_keeps_order() {
        let (catalogue, _, opener, regular) = sample();

        let all = catalogue.all_questions();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, opener);
        assert_eq!(all[1].id, regular);

        let openers = catalogue.questions(&|q| q.unforgivable);
        assert_eq!(openers.len(), 1);
        assert_eq!(openers[0].id, opener);
    }

    #[test]
    fn test_set_answer_replaces_existing() {
        let (mut catalogue, person, _, regular) = sample();
        catalogue.set_answer(regular, person, 1, 1);

        let stats = catalogue.answers(&|a| a.question_id == regular);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].yes_count, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let (catalogue, person, _, regular) = sample();
        let json = catalogue.to_json().unwrap();

        let loaded = Catalogue::from_json(&json).unwrap();
        assert_eq!(loaded.person_count(), 1);
        assert_eq!(loaded.question_count(), 2);
        assert_eq!(loaded.answers(&|a| a.person_id == person && a.question_id == regular).len(), 1);
    }

    #[test]
    fn test_from_json_rejects_dangling_stat() {
        let mut catalogue = Catalogue::new();
        let question = catalogue.add_question(Question::new("Is it fictional?"));
        catalogue.set_answer(question, PersonId::new(), 1, 0);
        let json = catalogue.to_json().unwrap();

        let err = Catalogue::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogueError::UnknownPerson(_)));
    }

    #[test]
    fn test_from_json_rejects_inconsistent_counts() {
        let json = format!(
            r#"{{"people":[{{"id":"{}","name":"Ghost","correct_answers":9,"occurrence_count":1}}]}}"#,
            uuid::Uuid::nil()
        );

        let err = Catalogue::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogueError::InconsistentCounts(id) if id == PersonId::from_uuid(uuid::Uuid::nil())));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Catalogue::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogueError::Parse(_)));
    }
}
