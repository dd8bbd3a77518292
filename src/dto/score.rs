//! Score submission payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::HighScoreEntity,
    dto::format_timestamp,
    error::{Rejection, RejectionKind},
    state::game::GameName,
};

/// Final score sent by a client when a game ends.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    /// Wire name of the game.
    pub game: String,
    /// Raw player tag; normalized server side.
    pub username: String,
    /// Final score. Non-numeric values are rejected rather than failing to decode.
    #[schema(value_type = f64)]
    pub score: Value,
    /// Server-tracked session; when present its duration and moves are authoritative.
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<Uuid>,
    /// Client-measured duration in milliseconds, used without a tracked session.
    #[serde(default, alias = "sessionDuration")]
    pub session_duration: Option<u64>,
    /// Client-counted moves, used without a tracked session.
    #[serde(default)]
    pub moves: Option<u32>,
}

/// Stored score echoed back after a successful submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HighScoreSummary {
    /// Store-assigned id.
    pub id: i64,
    /// Game the score belongs to.
    pub game: GameName,
    /// Normalized player tag.
    pub username: String,
    /// Stored score.
    pub score: u32,
    /// RFC3339 insertion time.
    pub created_at: String,
}

impl From<HighScoreEntity> for HighScoreSummary {
    fn from(entity: HighScoreEntity) -> Self {
        Self {
            id: entity.id,
            game: entity.game,
            username: entity.username,
            score: entity.score,
            created_at: format_timestamp(entity.created_at),
        }
    }
}

/// Result of a submission attempt. Exactly one of `score`, `reason` or `error` is set.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResult {
    /// True only when the score was stored.
    pub success: bool,
    /// Rejection category when validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionKind>,
    /// Human-readable rejection reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Store failure message when the write did not go through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stored row on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<HighScoreSummary>,
}

impl SubmissionResult {
    /// The score was stored.
    pub fn accepted(score: HighScoreSummary) -> Self {
        Self {
            success: true,
            rejection: None,
            reason: None,
            error: None,
            score: Some(score),
        }
    }

    /// A validator refused the submission.
    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            success: false,
            rejection: Some(rejection.kind()),
            reason: Some(rejection.reason()),
            error: None,
            score: None,
        }
    }

    /// The store write failed.
    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            rejection: None,
            reason: None,
            error: Some(error),
            score: None,
        }
    }
}
