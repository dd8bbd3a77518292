//! In-memory lifecycle of a single play-through.

use std::time::{Duration, Instant, SystemTime};

use thiserror::Error;
use uuid::Uuid;

use crate::state::game::GameName;

/// Why a session stopped accepting moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A score submission was attempted for this session.
    Submitted,
    /// The player left, or the session outlived its TTL.
    Abandoned,
}

/// Lifecycle position of a [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Started, no move recorded yet.
    Created,
    /// At least one move recorded.
    Active,
    /// Terminal.
    Ended(EndReason),
}

/// Errors raised when driving a session past its terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session is already in its terminal state.
    #[error("session {0} has already ended")]
    Ended(Uuid),
}

/// Progress of one play-through, owned by whoever started it.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Opaque identifier handed to the client.
    pub id: Uuid,
    /// Game being played.
    pub game: GameName,
    /// Wall-clock start, for display.
    pub started_at: SystemTime,
    started: Instant,
    ended: Option<Instant>,
    moves: u32,
    status: SessionStatus,
}

impl GameSession {
    /// Start a fresh session for `game`.
    pub fn new(game: GameName) -> Self {
        Self::starting_at(game, Instant::now())
    }

    /// Start a session at a given instant.
    pub fn starting_at(game: GameName, started: Instant) -> Self {
        Self {
            id: Uuid::new_v4(),
            game,
            started_at: SystemTime::now(),
            started,
            ended: None,
            moves: 0,
            status: SessionStatus::Created,
        }
    }

    /// Moves recorded so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Current lifecycle position.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True once submitted or abandoned.
    pub fn is_ended(&self) -> bool {
        matches!(self.status, SessionStatus::Ended(_))
    }

    /// Record one player action and return the new move count.
    pub fn record_move(&mut self) -> Result<u32, SessionError> {
        self.record_moves(1)
    }

    /// Record `count` player actions at once, e.g. a batched client flush.
    pub fn record_moves(&mut self, count: u32) -> Result<u32, SessionError> {
        if self.is_ended() {
            return Err(SessionError::Ended(self.id));
        }
        self.moves = self.moves.saturating_add(count);
        if self.moves > 0 {
            self.status = SessionStatus::Active;
        }
        Ok(self.moves)
    }

    /// Move to the terminal state. Only the first call succeeds.
    pub fn end(&mut self, reason: EndReason) -> Result<Duration, SessionError> {
        self.end_at(reason, Instant::now())
    }

    /// [`end`](Self::end) with an explicit end instant.
    pub fn end_at(&mut self, reason: EndReason, now: Instant) -> Result<Duration, SessionError> {
        if self.is_ended() {
            return Err(SessionError::Ended(self.id));
        }
        self.ended = Some(now);
        self.status = SessionStatus::Ended(reason);
        Ok(self.duration_at(now))
    }

    /// Time played so far, frozen once the session ends.
    pub fn elapsed(&self) -> Duration {
        self.duration_at(Instant::now())
    }

    fn duration_at(&self, now: Instant) -> Duration {
        self.ended
            .unwrap_or(now)
            .saturating_duration_since(self.started)
    }
}

/// Create a session for a newly started game.
pub fn create_game_session(game: GameName) -> GameSession {
    GameSession::new(game)
}
