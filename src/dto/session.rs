use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::format_system_time,
    state::{
        game::GameName,
        session::{EndReason, GameSession, SessionStatus},
    },
};

/// Request to start tracking a new play-through.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// Wire name of the game, e.g. `snake` or `2048`.
    pub game: String,
}

/// Batch of player actions to add to a session.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordMovesRequest {
    /// Number of actions; defaults to one.
    #[serde(default = "default_move_count")]
    #[validate(range(min = 1, max = 10_000))]
    pub count: u32,
}

fn default_move_count() -> u32 {
    1
}

/// Lifecycle position reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatusDto {
    /// No move recorded yet.
    Created,
    /// At least one move recorded.
    Active,
    /// Ended by a score submission.
    Submitted,
    /// Ended without a submission.
    Abandoned,
}

impl From<SessionStatus> for SessionStatusDto {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Created => SessionStatusDto::Created,
            SessionStatus::Active => SessionStatusDto::Active,
            SessionStatus::Ended(EndReason::Submitted) => SessionStatusDto::Submitted,
            SessionStatus::Ended(EndReason::Abandoned) => SessionStatusDto::Abandoned,
        }
    }
}

/// Snapshot of a tracked session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionSummary {
    /// Session id to send back with moves and the final score.
    pub id: Uuid,
    /// Game being played.
    pub game: GameName,
    /// Moves recorded so far.
    pub moves: u32,
    /// Lifecycle position.
    pub status: SessionStatusDto,
    /// RFC3339 start time.
    pub started_at: String,
    /// Milliseconds played so far, frozen once ended.
    pub elapsed_ms: u64,
}

impl From<&GameSession> for SessionSummary {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id,
            game: session.game,
            moves: session.moves(),
            status: session.status().into(),
            started_at: format_system_time(session.started_at),
            elapsed_ms: u64::try_from(session.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}
