//! Guess timing.

use guess_catalog::Person;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Highest match ratio among the candidates, or `None` for an empty set.
pub fn max_match_ratio(candidates: &[Person]) -> Option<f64> {
    candidates.iter().map(Person::match_ratio).reduce(f64::max)
}

/// Whether the engine should name a candidate instead of asking on.
///
/// The best candidate's ratio must be strictly above the threshold for the
/// current question count.
pub fn can_guess(config: &EngineConfig, candidates: &[Person], questions_asked: u32) -> bool {
    let Some(threshold) = config.threshold_for(questions_asked) else {
        return false;
    };
    max_match_ratio(candidates).is_some_and(|ratio| ratio > threshold)
}

/// The candidate with the highest match ratio, first found on ties.
pub fn select_guess_target(candidates: &[Person]) -> Result<&Person, EngineError> {
    let mut best: Option<(&Person, f64)> = None;
    for person in candidates {
        let ratio = person.match_ratio();
        if best.map_or(true, |(_, top)| ratio > top) {
            best = Some((person, ratio));
        }
    }
    best.map(|(person, _)| person).ok_or(EngineError::GuessSelection {
        candidates: candidates.len(),
    })
}
