//! Session registry - many isolated games over one shared repository.

use std::collections::HashMap;
use std::sync::Arc;

use guess_catalog::{AnswerType, Repository};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::{GameSession, GameSummary, Step};

/// Unique identifier for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns every live session. Sessions never share mutable state; only the
/// repository is shared.
///
/// A turn that fails with a fatal error ends its session.
pub struct GameRegistry<R: Repository + ?Sized> {
    repository: Arc<R>,
    config: EngineConfig,
    sessions: HashMap<SessionId, GameSession<R>>,
}

impl<R: Repository + ?Sized> GameRegistry<R> {
    /// Create a registry serving sessions from `repository`.
    ///
    /// Fails if `config` does not validate.
    pub fn new(repository: Arc<R>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            repository,
            config,
            sessions: HashMap::new(),
        })
    }

    /// Create a registry with the default configuration.
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self {
            repository,
            config: EngineConfig::default(),
            sessions: HashMap::new(),
        }
    }

    /// Start a new session and return its ID.
    pub fn start_game(&mut self) -> SessionId {
        let id = SessionId::new();
        let session = GameSession::start_validated(Arc::clone(&self.repository), self.config.clone());
        self.sessions.insert(id, session);
        info!("Session {} started", id);
        id
    }

    /// Play one turn in a session.
    pub fn get_step(&mut self, id: SessionId, answer: AnswerType) -> Result<Step, EngineError> {
        let result = self.session_mut(id)?.get_step(answer);
        self.drop_if_fatal(id, result)
    }

    /// Confirm the pending guess in a session.
    pub fn confirm_guess(&mut self, id: SessionId) -> Result<Step, EngineError> {
        let result = self.session_mut(id)?.confirm_guess();
        self.drop_if_fatal(id, result)
    }

    /// Summary of a session.
    pub fn get_summary(&self, id: SessionId) -> Result<GameSummary, EngineError> {
        self.sessions
            .get(&id)
            .map(GameSession::summary)
            .ok_or(EngineError::UnknownSession(id))
    }

    /// Discard a session, returning its final summary if it existed.
    pub fn end_game(&mut self, id: SessionId) -> Option<GameSummary> {
        let summary = self.sessions.remove(&id).map(GameSession::end);
        if summary.is_some() {
            info!("Session {} ended", id);
        }
        summary
    }

    pub fn session(&self, id: SessionId) -> Option<&GameSession<R>> {
        self.sessions.get(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn session_mut(&mut self, id: SessionId) -> Result<&mut GameSession<R>, EngineError> {
        self.sessions
            .get_mut(&id)
            .ok_or(EngineError::UnknownSession(id))
    }

    fn drop_if_fatal(&mut self, id: SessionId, result: Result<Step, EngineError>) -> Result<Step, EngineError> {
        if let Err(err) = &result {
            if err.is_fatal() {
                warn!("Session {} corrupted and ended: {}", id, err);
                self.sessions.remove(&id);
            }
        }
        result
    }
}
