//! Game sessions - the per-session state machine.
//!
//! A session moves through these states:
//! 1. **Initialized**: the first turn picks an opening question
//! 2. **UninitializedPeopleSet**: the answer to the opener starts candidate bookkeeping
//! 3. **InProgress**: each turn either asks the best unused question or guesses
//! 4. **Guessing**: any answer rejects the guess and play continues; only
//!    [`GameSession::confirm_guess`] wins the game
//! 5. **Finished**: terminal, carrying the outcome
//!
//! Running out of questions or hitting the question limit ends the game in
//! defeat.

mod state;
mod summary;

pub use state::*;
pub use summary::*;

use std::collections::HashSet;
use std::sync::Arc;

use guess_catalog::{AnswerStat, AnswerType, Person, PersonId, Question, QuestionId, Repository};
use tracing::{debug, info, warn};

use crate::aggregator;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::selection::{best_partition, can_guess, discrimination_score, select_guess_target};

/// One player's game, reading shared data through a repository.
pub struct GameSession<R: Repository + ?Sized> {
    repository: Arc<R>,
    config: EngineConfig,
    state: GameState,
    data: GameData,
    pending_guess: Option<Person>,
    /// Catalogue-side answers as they were before the pending guess
    /// overwrote them.
    answers_before_guess: Vec<AnswerType>,
    guessed_person: Option<Person>,
}

impl<R: Repository + ?Sized> GameSession<R> {
    /// Start a fresh game with every person in the repository as a candidate.
    ///
    /// Fails if `config` does not validate.
    pub fn start(repository: Arc<R>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::start_validated(repository, config))
    }

    /// Start a game with the default configuration.
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self::start_validated(repository, EngineConfig::default())
    }

    /// Start a game with a config that already passed validation.
    pub(crate) fn start_validated(repository: Arc<R>, config: EngineConfig) -> Self {
        // Match counters only describe the current game.
        let people: Vec<Person> = repository
            .people()
            .into_iter()
            .map(|mut person| {
                person.reset_counts();
                person
            })
            .collect();
        info!("Starting game with {} candidates", people.len());
        Self {
            repository,
            config,
            state: GameState::Initialized,
            data: GameData::new(people),
            pending_guess: None,
            answers_before_guess: Vec::new(),
            guessed_person: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The candidate currently being guessed, if any.
    pub fn pending_guess(&self) -> Option<&Person> {
        self.pending_guess.as_ref()
    }

    /// Play one turn.
    ///
    /// `answer` replies to the previous step. It is ignored on the opening
    /// turn and after the game has finished. In the guessing state any answer
    /// rejects the guessed candidate.
    pub fn get_step(&mut self, answer: AnswerType) -> Result<Step, EngineError> {
        match self.state {
            GameState::UninitializedPeopleSet => {
                self.apply_answer(answer);
                self.state = GameState::InProgress;
            }
            GameState::InProgress => self.apply_answer(answer),
            GameState::Initialized | GameState::Guessing | GameState::Finished(_) => {}
        }
        self.compute_next_step()
    }

    /// Accept the pending guess as correct and finish the game.
    pub fn confirm_guess(&mut self) -> Result<Step, EngineError> {
        if self.state != GameState::Guessing {
            return Err(self.invalid("confirm a guess"));
        }
        let person = self
            .pending_guess
            .take()
            .ok_or_else(|| self.invalid("confirm a guess without a candidate"))?;

        info!(
            "Guess confirmed: {} after {} questions",
            person.name, self.data.questions_asked
        );
        self.answers_before_guess.clear();
        self.guessed_person = Some(person);
        self.state = GameState::Finished(Outcome::Won);
        Ok(Step::Victory)
    }

    /// Summary of the game so far.
    pub fn summary(&self) -> GameSummary {
        let guessed_name = self.guessed_person.as_ref().map(|p| p.name.clone());
        GameSummary::from_game(guessed_name, &self.data)
    }

    /// Discard the session, handing back its final summary.
    pub fn end(self) -> GameSummary {
        debug!("Ending game in state {:?}", self.state);
        self.summary()
    }

    fn apply_answer(&mut self, answer: AnswerType) {
        let Some(question_id) = self.data.current_question().map(|q| q.question_id) else {
            return;
        };
        let stats = self
            .repository
            .answers(&|stat| stat.question_id == question_id);
        aggregator::record_answer(&mut self.data, &stats, answer);
        debug!("Recorded answer {} for question {}", answer, question_id);
    }

    /// Run transitions until one yields a step for the user.
    fn compute_next_step(&mut self) -> Result<Step, EngineError> {
        let limit = self.transition_limit();
        for _ in 0..limit {
            if let Some(step) = self.transition()? {
                return Ok(step);
            }
        }
        warn!("No step produced within {} internal transitions", limit);
        Err(self.invalid("produce a step within the transition limit"))
    }

    fn transition_limit(&self) -> u32 {
        self.config.max_internal_transitions.unwrap_or_else(|| {
            self.config
                .question_limit
                .saturating_sub(self.data.questions_asked)
                + 2
        })
    }

    /// A single transition. `None` means the machine moved on without
    /// anything to show.
    fn transition(&mut self) -> Result<Option<Step>, EngineError> {
        if self.data.questions_asked >= self.config.question_limit {
            info!("Question limit of {} reached", self.config.question_limit);
            return Ok(Some(self.finish_lost()));
        }

        match self.state {
            GameState::Initialized => {
                let step = match self.ask_opening_question()? {
                    Some(text) => {
                        self.state = GameState::UninitializedPeopleSet;
                        Step::Question { text }
                    }
                    None => {
                        info!("No questions available to open the game");
                        self.finish_lost()
                    }
                };
                Ok(Some(step))
            }
            GameState::InProgress => self.advance().map(Some),
            GameState::Guessing => {
                self.reject_guess()?;
                Ok(None)
            }
            GameState::Finished(Outcome::Won) => Ok(Some(Step::Victory)),
            GameState::Finished(Outcome::Lost) => Ok(Some(Step::Defeat)),
            GameState::UninitializedPeopleSet => {
                Err(self.invalid("compute a step before the opening answer"))
            }
        }
    }

    /// Guess if a candidate stands out, otherwise ask the next question.
    fn advance(&mut self) -> Result<Step, EngineError> {
        if can_guess(&self.config, &self.data.people_set, self.data.questions_asked) {
            return self.start_guess();
        }
        match self.ask_regular_question()? {
            Some(text) => Ok(Step::Question { text }),
            None => {
                info!(
                    "Out of questions after {} asked",
                    self.data.questions_asked
                );
                Ok(self.finish_lost())
            }
        }
    }

    fn start_guess(&mut self) -> Result<Step, EngineError> {
        let target = select_guess_target(&self.data.people_set)?.clone();
        info!(
            "Guessing {} (match ratio {:.3}) after {} questions",
            target.name,
            target.match_ratio(),
            self.data.questions_asked
        );

        let target_id = target.id;
        let person_stats = self
            .repository
            .answers(&|stat| stat.person_id == target_id);
        self.answers_before_guess = self
            .data
            .question_set
            .iter()
            .map(|q| q.person_answer)
            .collect();
        aggregator::fill_person_answers(&mut self.data.question_set, &person_stats);

        let text = self.config.guess_prompt_for(&target.name);
        self.pending_guess = Some(target);
        self.state = GameState::Guessing;
        Ok(Step::Guessing { text })
    }

    fn reject_guess(&mut self) -> Result<(), EngineError> {
        let person = self
            .pending_guess
            .take()
            .ok_or_else(|| self.invalid("resolve a guess without a candidate"))?;

        let saved = std::mem::take(&mut self.answers_before_guess);
        for (question, answer) in self.data.question_set.iter_mut().zip(saved) {
            question.person_answer = answer;
        }

        if self.data.remove_candidate(person.id).is_none() {
            warn!("Rejected candidate {} was already removed", person.name);
        }
        info!(
            "Guess rejected: {}, {} candidates left",
            person.name,
            self.data.people_set.len()
        );
        self.state = GameState::InProgress;
        Ok(())
    }

    /// Openers come from the unforgivable questions, or from the whole
    /// catalogue when there are none.
    fn ask_opening_question(&mut self) -> Result<Option<String>, EngineError> {
        let mut pool = self.repository.questions(&|q| q.unforgivable);
        if pool.is_empty() {
            pool = self.repository.all_questions();
        }
        self.ask_best(&pool)
    }

    fn ask_regular_question(&mut self) -> Result<Option<String>, EngineError> {
        let asked: HashSet<QuestionId> = self
            .data
            .question_set
            .iter()
            .map(|q| q.question_id)
            .collect();
        let pool = self.repository.questions(&|q| !asked.contains(&q.id));
        self.ask_best(&pool)
    }

    /// Pick the best question from `pool`, record it and return its text.
    fn ask_best(&mut self, pool: &[Question]) -> Result<Option<String>, EngineError> {
        // Statistics of people no longer in the game do not count.
        let candidates: HashSet<PersonId> = self.data.people_set.iter().map(|p| p.id).collect();
        let repository = &self.repository;
        let stats_for = |question_id: QuestionId| -> Vec<AnswerStat> {
            repository.answers(&|stat| {
                stat.question_id == question_id
                    && (candidates.is_empty() || candidates.contains(&stat.person_id))
            })
        };

        let Some(best) = best_partition(pool, |q| discrimination_score(&stats_for(q.id)))? else {
            return Ok(None);
        };
        let question = best.question.clone();
        let person_answer = aggregator::collective_answer(&stats_for(question.id));
        debug!(
            "Selected question {} with score {} from {} candidates",
            question.id,
            best.score,
            pool.len()
        );

        self.data
            .push_question(GameQuestion::new(&question, person_answer));
        Ok(Some(question.text))
    }

    fn finish_lost(&mut self) -> Step {
        self.pending_guess = None;
        self.answers_before_guess.clear();
        self.state = GameState::Finished(Outcome::Lost);
        Step::Defeat
    }

    fn invalid(&self, action: &'static str) -> EngineError {
        EngineError::InvalidState {
            state: self.state,
            action,
        }
    }
}
