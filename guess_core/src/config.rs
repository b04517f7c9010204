//! Engine configuration.
//!
//! Defaults reproduce the classic game: at most 40 questions, no guess before
//! the fifth, and guess thresholds that relax as the game drags on.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A guess threshold that applies from `from` questions onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessBracket {
    /// First question count the bracket covers.
    pub from: u32,
    /// The best candidate's match ratio must be strictly above this.
    pub threshold: f64,
}

impl GuessBracket {
    pub fn new(from: u32, threshold: f64) -> Self {
        Self { from, threshold }
    }
}

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hard cap on questions asked; reaching it ends the game in defeat.
    pub question_limit: u32,

    /// No guess is attempted before this many questions.
    pub min_questions: u32,

    /// Thresholds by question count, sorted by `from`.
    pub guess_brackets: Vec<GuessBracket>,

    /// Cap on back-to-back internal transitions in one turn.
    /// `None` derives it from the remaining question budget.
    pub max_internal_transitions: Option<u32>,

    /// Prompt shown when guessing; `{name}` is replaced by the candidate.
    pub guess_prompt: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            question_limit: 40,
            min_questions: 5,
            guess_brackets: vec![
                GuessBracket::new(5, 0.89),
                GuessBracket::new(10, 0.79),
                GuessBracket::new(20, 0.74),
                GuessBracket::new(30, 0.72),
            ],
            max_internal_transitions: None,
            guess_prompt: "Is it {name}?".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            toml::from_str(source).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.question_limit == 0 {
            return Err(EngineError::Config("question_limit must be positive".into()));
        }
        if self.max_internal_transitions == Some(0) {
            return Err(EngineError::Config(
                "max_internal_transitions must be positive".into(),
            ));
        }
        if self
            .guess_brackets
            .windows(2)
            .any(|pair| pair[0].from >= pair[1].from)
        {
            return Err(EngineError::Config(
                "guess_brackets must be sorted by strictly increasing `from`".into(),
            ));
        }
        if let Some(bracket) = self
            .guess_brackets
            .iter()
            .find(|b| !(0.0..=1.0).contains(&b.threshold))
        {
            return Err(EngineError::Config(format!(
                "guess threshold {} is outside [0, 1]",
                bracket.threshold
            )));
        }
        Ok(())
    }

    /// Threshold in force after `questions_asked` questions, or `None` while
    /// guessing is not allowed yet.
    pub fn threshold_for(&self, questions_asked: u32) -> Option<f64> {
        if questions_asked < self.min_questions {
            return None;
        }
        self.guess_brackets
            .iter()
            .rev()
            .find(|b| b.from <= questions_asked)
            .map(|b| b.threshold)
    }

    /// Render the guess prompt for a candidate.
    pub fn guess_prompt_for(&self, name: &str) -> String {
        self.guess_prompt.replace("{name}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.question_limit, 40);
        assert_eq!(config.min_questions, 5);
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold_for(0), None);
        assert_eq!(config.threshold_for(4), None);
        assert_eq!(config.threshold_for(5), Some(0.89));
        assert_eq!(config.threshold_for(9), Some(0.89));
        assert_eq!(config.threshold_for(10), Some(0.79));
        assert_eq!(config.threshold_for(19), Some(0.79));
        assert_eq!(config.threshold_for(20), Some(0.74));
        assert_eq!(config.threshold_for(29), Some(0.74));
        assert_eq!(config.threshold_for(30), Some(0.72));
        assert_eq!(config.threshold_for(39), Some(0.72));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str("question_limit = 20\nguess_prompt = \"Thinking of {name}?\"").unwrap();
        assert_eq!(config.question_limit, 20);
        assert_eq!(config.min_questions, 5);
        assert_eq!(config.guess_brackets.len(), 4);
        assert_eq!(config.guess_prompt_for("Alan Turing"), "Thinking of Alan Turing?");
    }

    #[test]
    fn test_from_toml_brackets() {
        let source = r#"
min_questions = 2

[[guess_brackets]]
from = 2
threshold = 0.5

[[guess_brackets]]
from = 8
threshold = 0.4
"#;
        let config = EngineConfig::from_toml_str(source).unwrap();
        assert_eq!(config.threshold_for(1), None);
        assert_eq!(config.threshold_for(3), Some(0.5));
        assert_eq!(config.threshold_for(8), Some(0.4));
    }

    #[test]
    fn test_validate_rejects_unsorted_brackets() {
        let config = EngineConfig {
            guess_brackets: vec![GuessBracket::new(10, 0.8), GuessBracket::new(5, 0.9)],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_threshold_and_limit() {
        let config = EngineConfig {
            guess_brackets: vec![GuessBracket::new(5, 1.5)],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            question_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = EngineConfig::from_toml_str("question_limit = \"many\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
