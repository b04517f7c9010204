//! Person definitions.

use serde::{Deserialize, Serialize};

use super::PersonId;

/// A person the game may end up guessing.
///
/// `correct_answers` and `occurrence_count` are session bookkeeping: how many
/// times the person's implied answer matched the user, out of how many times
/// the person had an implied answer at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub occurrence_count: u32,
}

impl Person {
    /// Create a new person with a fresh ID and zeroed counters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            correct_answers: 0,
            occurrence_count: 0,
        }
    }

    /// Set the ID.
    pub fn with_id(mut self, id: PersonId) -> Self {
        self.id = id;
        self
    }

    /// Set both counters. `correct` is clamped to `occurrences`.
    pub fn with_counts(mut self, correct: u32, occurrences: u32) -> Self {
        self.occurrence_count = occurrences;
        self.correct_answers = correct.min(occurrences);
        self
    }

    /// Clear both counters for a fresh game.
    pub fn reset_counts(&mut self) {
        self.correct_answers = 0;
        self.occurrence_count = 0;
    }

    /// Whether `correct_answers` stays within `occurrence_count`.
    pub fn has_consistent_counts(&self) -> bool {
        self.correct_answers <= self.occurrence_count
    }

    /// Share of considered answers that matched, or 0.0 if never considered.
    pub fn match_ratio(&self) -> f64 {
        if self.occurrence_count == 0 {
            0.0
        } else {
            f64::from(self.correct_answers) / f64::from(self.occurrence_count)
        }
    }

    /// Count one considered answer, and a match if `matched`.
    pub fn record_occurrence(&mut self, matched: bool) {
        self.occurrence_count += 1;
        if matched {
            self.correct_answers += 1;
        }
    }
}
