//! Shared application state and the live session registry.

pub mod board;
pub mod game;
pub mod session;

use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::score_store::ScoreStore,
    error::ServiceError,
    state::{
        game::GameName,
        session::{EndReason, GameSession},
    },
};

/// Cheaply cloneable handle handed to every route.
pub type SharedState = Arc<AppState>;

/// Central application state: the score store, live sessions, and configuration.
pub struct AppState {
    store: Arc<dyn ScoreStore>,
    sessions: DashMap<Uuid, GameSession>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn ScoreStore>, config: AppConfig) -> SharedState {
        Arc::new(Self {
            store,
            sessions: DashMap::new(),
            config,
        })
    }

    /// Handle to the backing score store.
    pub fn store(&self) -> Arc<dyn ScoreStore> {
        Arc::clone(&self.store)
    }

    /// Configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a new session and return a copy of it.
    pub fn start_session(&self, game: GameName) -> GameSession {
        self.register_session(GameSession::new(game))
    }

    /// Track an already built session, e.g. one resumed with its original start.
    pub fn register_session(&self, session: GameSession) -> GameSession {
        self.sessions.insert(session.id, session.clone());
        session
    }

    /// Copy of a live session.
    pub fn session(&self, id: Uuid) -> Option<GameSession> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// Record player actions on a live session and return its updated copy.
    pub fn record_moves(&self, id: Uuid, count: u32) -> Result<GameSession, ServiceError> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| session_not_found(id))?;
        entry.record_moves(count)?;
        Ok(entry.value().clone())
    }

    /// Remove a session from the registry and move it to its terminal state.
    ///
    /// The returned session carries its final duration and move count.
    pub fn end_session(&self, id: Uuid, reason: EndReason) -> Result<GameSession, ServiceError> {
        let (_, mut session) = self
            .sessions
            .remove(&id)
            .ok_or_else(|| session_not_found(id))?;
        session.end(reason)?;
        Ok(session)
    }

    /// Abandon every session older than `ttl`, returning how many were dropped.
    pub fn sweep_expired_sessions(&self, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.elapsed() < ttl);
        before.saturating_sub(self.sessions.len())
    }

    /// Number of sessions still being tracked.
    pub fn live_sessions(&self) -> usize {
        self.sessions.len()
    }
}

fn session_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("session {id}"))
}
