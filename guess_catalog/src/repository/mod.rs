//! Repository - the read-only source of people, questions and statistics.
//!
//! The engine never writes through this interface. Implementations must be
//! safe to read from many sessions at once.

mod catalogue;

pub use catalogue::*;

use crate::answers::AnswerStat;
use crate::entities::{Person, Question};

/// Read access to the durable game data.
///
/// Every method returns results in a stable order; the engine breaks ties by
/// taking the first item found.
pub trait Repository: Send + Sync {
    /// Questions matching a predicate.
    fn questions(&self, predicate: &dyn Fn(&Question) -> bool) -> Vec<Question>;

    /// Every question in the catalogue.
    fn all_questions(&self) -> Vec<Question> {
        self.questions(&|_| true)
    }

    /// Answer statistics matching a predicate.
    fn answers(&self, predicate: &dyn Fn(&AnswerStat) -> bool) -> Vec<AnswerStat>;

    /// Every person, used as the initial candidate set.
    fn people(&self) -> Vec<Person>;
}
