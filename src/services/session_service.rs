//! Service helpers driving the session registry from the REST routes.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dto::session::{CreateSessionRequest, SessionSummary},
    error::ServiceError,
    state::{SharedState, game::GameName, session::EndReason},
};

/// Start tracking a play-through of a scored game.
pub fn create_session(
    state: &SharedState,
    request: CreateSessionRequest,
) -> Result<SessionSummary, ServiceError> {
    let game = request
        .game
        .parse::<GameName>()
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
    let session = state.start_session(game);
    debug!(session_id = %session.id, %game, "session started");
    Ok(SessionSummary::from(&session))
}

/// Snapshot of a live session.
pub fn get_session(state: &SharedState, id: Uuid) -> Result<SessionSummary, ServiceError> {
    state
        .session(id)
        .map(|session| SessionSummary::from(&session))
        .ok_or_else(|| ServiceError::NotFound(format!("session {id}")))
}

/// Add `count` player actions to a live session.
pub fn record_moves(
    state: &SharedState,
    id: Uuid,
    count: u32,
) -> Result<SessionSummary, ServiceError> {
    let session = state.record_moves(id, count)?;
    Ok(SessionSummary::from(&session))
}

/// End a session without submitting a score.
pub fn abandon_session(state: &SharedState, id: Uuid) -> Result<SessionSummary, ServiceError> {
    let session = state.end_session(id, EndReason::Abandoned)?;
    debug!(session_id = %id, moves = session.moves(), "session abandoned");
    Ok(SessionSummary::from(&session))
}

/// Abandon sessions older than the configured TTL.
pub fn sweep_expired(state: &SharedState) -> usize {
    let dropped = state.sweep_expired_sessions(state.config().session_ttl);
    if dropped > 0 {
        info!(dropped, live = state.live_sessions(), "abandoned expired sessions");
    }
    dropped
}
