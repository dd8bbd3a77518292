//! Score submission pipeline: validate in a fixed order, then write once.
//!
//! Validation runs game → username → score → engagement and stops at the first
//! failure without touching the store. An accepted submission is written exactly
//! once; a store failure is reported in the outcome and never retried.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dao::{
        models::{HighScoreEntity, NewHighScoreEntity},
        score_store::ScoreStore,
    },
    dto::{
        score::SubmitScoreRequest,
        validation::{validate_engagement, validate_score_value, validate_username},
    },
    error::{Rejection, ServiceError},
    state::{
        SharedState,
        game::GameName,
        session::{EndReason, GameSession, SessionError},
    },
};

/// Engagement measurements backing a submission; absent values are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Engagement {
    /// Time played.
    pub duration: Option<Duration>,
    /// Player actions counted.
    pub moves: Option<u32>,
}

impl Engagement {
    /// Server-side measurements of a session.
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            duration: Some(session.elapsed()),
            moves: Some(session.moves()),
        }
    }

    /// Client-reported measurements.
    pub fn reported(duration_ms: Option<u64>, moves: Option<u32>) -> Self {
        Self {
            duration: duration_ms.map(Duration::from_millis),
            moves,
        }
    }
}

/// A submission that passed every validator and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    /// Game the score belongs to.
    pub game: GameName,
    /// Normalized three-character tag.
    pub username: String,
    /// Validated score, integral part only.
    pub score: u32,
    /// Tracked session the score came from, if any.
    pub session_id: Option<Uuid>,
    /// Duration checked against the game's floor.
    pub session_duration: Option<Duration>,
    /// Moves checked against the game's floor.
    pub moves: Option<u32>,
}

impl From<&ScoreSubmission> for NewHighScoreEntity {
    fn from(submission: &ScoreSubmission) -> Self {
        Self {
            game: submission.game,
            username: submission.username.clone(),
            score: submission.score,
        }
    }
}

/// How a submission attempt ended.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Written to the store.
    Accepted(HighScoreEntity),
    /// Refused by a validator; nothing was sent.
    Rejected(Rejection),
    /// Valid, but the store write failed with this message.
    Failed(String),
}

/// Run the username, score and engagement validators in order.
pub fn validate_submission(
    game: GameName,
    raw_username: &str,
    score: &Value,
    engagement: Engagement,
    session_id: Option<Uuid>,
) -> Result<ScoreSubmission, Rejection> {
    let username = validate_username(raw_username)
        .map_err(|err| Rejection::from_validation(Rejection::InvalidUsername, err))?;
    let score = validate_score_value(score)
        .map_err(|err| Rejection::from_validation(Rejection::InvalidScore, err))?;
    validate_engagement(game, engagement.duration, engagement.moves)
        .map_err(|err| Rejection::from_validation(Rejection::EngagementTooLow, err))?;

    Ok(ScoreSubmission {
        game,
        username,
        score,
        session_id,
        session_duration: engagement.duration,
        moves: engagement.moves,
    })
}

/// Perform the single store write for a validated submission.
pub async fn persist(store: &dyn ScoreStore, submission: &ScoreSubmission) -> SubmissionOutcome {
    match store.insert_score(submission.into()).await {
        Ok(row) => {
            info!(
                game = %row.game,
                username = %row.username,
                score = row.score,
                "high score stored"
            );
            SubmissionOutcome::Accepted(row)
        }
        Err(err) => {
            warn!(game = %submission.game, error = %err, "failed to store high score");
            SubmissionOutcome::Failed(err.client_message())
        }
    }
}

/// Validate and persist the final score of a session, ending it.
///
/// Fails only when the session had already ended; every other path resolves to a
/// [`SubmissionOutcome`].
pub async fn submit_session_score(
    store: &dyn ScoreStore,
    session: &mut GameSession,
    final_score: f64,
    raw_username: &str,
) -> Result<SubmissionOutcome, SessionError> {
    session.end(EndReason::Submitted)?;
    let score = Value::from(final_score);
    let engagement = Engagement::from_session(session);

    Ok(
        match validate_submission(
            session.game,
            raw_username,
            &score,
            engagement,
            Some(session.id),
        ) {
            Ok(submission) => persist(store, &submission).await,
            Err(rejection) => reject(session.game.as_str(), rejection),
        },
    )
}

/// Handle a submission arriving over HTTP.
///
/// With a tracked `session_id` the registry supplies duration and moves and the
/// session ends with this attempt, whatever its outcome.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmissionOutcome, ServiceError> {
    let game = match request.game.parse::<GameName>() {
        Ok(game) => game,
        Err(err) => {
            return Ok(reject(&request.game, Rejection::UnsupportedGame(err.to_string())));
        }
    };

    let engagement = match request.session_id {
        Some(session_id) => {
            let session = state
                .session(session_id)
                .ok_or_else(|| ServiceError::NotFound(format!("session {session_id}")))?;
            if session.game != game {
                return Err(ServiceError::InvalidInput(format!(
                    "session {session_id} belongs to {}, not {game}",
                    session.game
                )));
            }
            let ended = state.end_session(session_id, EndReason::Submitted)?;
            Engagement::from_session(&ended)
        }
        None => Engagement::reported(request.session_duration, request.moves),
    };

    let outcome = match validate_submission(
        game,
        &request.username,
        &request.score,
        engagement,
        request.session_id,
    ) {
        Ok(submission) => persist(state.store().as_ref(), &submission).await,
        Err(rejection) => reject(game.as_str(), rejection),
    };
    Ok(outcome)
}

fn reject(game: &str, rejection: Rejection) -> SubmissionOutcome {
    debug!(game, kind = ?rejection.kind(), reason = %rejection, "score submission rejected");
    SubmissionOutcome::Rejected(rejection)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Instant};

    use serde_json::json;

    use super::*;
    use crate::{
        config::AppConfig, dao::score_store::memory::MemoryScoreStore, error::RejectionKind,
        state::AppState,
    };

    fn engagement(duration_ms: u64, moves: u32) -> Engagement {
        Engagement::reported(Some(duration_ms), Some(moves))
    }

    fn request(game: &str, username: &str, score: Value) -> SubmitScoreRequest {
        SubmitScoreRequest {
            game: game.into(),
            username: username.into(),
            score,
            session_id: None,
            session_duration: None,
            moves: None,
        }
    }

    #[test]
    fn accepts_2048_above_floor() {
        let submission = validate_submission(
            GameName::TwentyFortyEight,
            "AB1",
            &json!(120),
            engagement(3_500, 6),
            None,
        )
        .unwrap();

        assert_eq!(submission.username, "AB1");
        assert_eq!(submission.score, 120);
    }

    #[test]
    fn short_snake_session_is_rejected() {
        let rejection = validate_submission(
            GameName::Snake,
            "AB1",
            &json!(500),
            engagement(4_000, 100),
            None,
        )
        .unwrap_err();

        assert_eq!(rejection.kind(), RejectionKind::EngagementTooLow);
    }

    #[test]
    fn validators_run_in_order() {
        let rejection =
            validate_submission(GameName::Snake, "x", &json!(-5), engagement(0, 0), None)
                .unwrap_err();
        assert_eq!(rejection.kind(), RejectionKind::InvalidUsername);

        let rejection =
            validate_submission(GameName::Snake, "abc", &json!(-5), engagement(0, 0), None)
                .unwrap_err();
        assert_eq!(rejection.kind(), RejectionKind::InvalidScore);
    }

    #[tokio::test]
    async fn rejection_never_reaches_store() {
        let store = MemoryScoreStore::new();
        let state = AppState::new(Arc::new(store.clone()), AppConfig::default());

        let outcome = submit_score(&state, request("snake", "toolong", json!(10)))
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Rejected(_)));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn tic_tac_toe_is_unsupported() {
        let state = AppState::new(Arc::new(MemoryScoreStore::new()), AppConfig::default());
        let outcome = submit_score(&state, request("tic-tac-toe", "abc", json!(1)))
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::Rejected(rejection) => {
                assert_eq!(rejection.kind(), RejectionKind::UnsupportedGame)
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn store_failure_is_reported_not_raised() {
        let store = MemoryScoreStore::new();
        store.set_failing(true);
        let state = AppState::new(Arc::new(store), AppConfig::default());

        let mut body = request("2048", "ab1", json!(120));
        body.session_duration = Some(3_500);
        body.moves = Some(6);

        match submit_score(&state, body).await.unwrap() {
            SubmissionOutcome::Failed(message) => assert!(message.contains("offline")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tracked_session_is_authoritative_and_ends() {
        let store = MemoryScoreStore::new();
        let state = AppState::new(Arc::new(store.clone()), AppConfig::default());
        let session = state.start_session(GameName::Snake);
        state.record_moves(session.id, 50).unwrap();

        let mut body = request("snake", "abc", json!(900));
        body.session_id = Some(session.id);
        // Client claims a long game; the tracked session just started.
        body.session_duration = Some(60_000);

        let outcome = submit_score(&state, body).await.unwrap();
        match outcome {
            SubmissionOutcome::Rejected(rejection) => {
                assert_eq!(rejection.kind(), RejectionKind::EngagementTooLow)
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(state.session(session.id).is_none());
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn tracked_session_long_enough_is_stored() {
        let store = MemoryScoreStore::new();
        let state = AppState::new(Arc::new(store.clone()), AppConfig::default());
        let mut session = GameSession::starting_at(
            GameName::TwentyFortyEight,
            Instant::now() - Duration::from_secs(5),
        );
        session.record_moves(6).unwrap();
        let session = state.register_session(session);

        let mut body = request("2048", "ab1", json!(120));
        body.session_id = Some(session.id);
        // Reported values are ignored for tracked sessions.
        body.session_duration = Some(0);
        body.moves = Some(0);

        match submit_score(&state, body).await.unwrap() {
            SubmissionOutcome::Accepted(row) => assert_eq!(row.score, 120),
            other => panic!("expected acceptance, got {other:?}"),
        }
        assert!(state.session(session.id).is_none());
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = MemoryScoreStore::new();
        let state = AppState::new(Arc::new(store.clone()), AppConfig::default());

        let mut body = request("snake", "abc", json!(10));
        body.session_id = Some(Uuid::new_v4());

        assert!(matches!(
            submit_score(&state, body).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn session_game_must_match() {
        let state = AppState::new(Arc::new(MemoryScoreStore::new()), AppConfig::default());
        let session = state.start_session(GameName::Snake);

        let mut body = request("2048", "abc", json!(10));
        body.session_id = Some(session.id);

        assert!(matches!(
            submit_score(&state, body).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(state.session(session.id).is_some());
    }

    #[tokio::test]
    async fn session_score_is_stored_once() {
        let store = MemoryScoreStore::new();
        let start = Instant::now() - Duration::from_secs(10);
        let mut session = GameSession::starting_at(GameName::FlappyBird, start);
        session.record_moves(12).unwrap();

        let outcome = submit_session_score(&store, &mut session, 42.0, "z-9-q")
            .await
            .unwrap();
        match outcome {
            SubmissionOutcome::Accepted(row) => {
                assert_eq!(row.username, "Z9Q");
                assert_eq!(row.score, 42);
            }
            other => panic!("expected acceptance, got {other:?}"),
        }

        assert!(
            submit_session_score(&store, &mut session, 42.0, "z9q")
                .await
                .is_err()
        );
        assert_eq!(store.rows().len(), 1);
    }
}
