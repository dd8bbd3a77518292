use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{dao::models::HighScoreEntity, dto::format_timestamp, state::game::GameName};

/// Query parameters of the leaderboard route.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Number of entries; defaults to the configured limit.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

/// Query parameters of the qualification route.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct QualifiesQuery {
    /// Candidate score.
    #[validate(range(max = 1_000_000))]
    pub score: u32,
    /// Size of the top list to check against; defaults to the configured limit.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    /// Player tag.
    pub username: String,
    /// Final score.
    pub score: u32,
    /// RFC3339 insertion time.
    pub created_at: String,
}

impl LeaderboardEntry {
    /// Entry at 1-based `rank` for a stored row.
    pub fn ranked(rank: u32, entity: HighScoreEntity) -> Self {
        Self {
            rank,
            username: entity.username,
            score: entity.score,
            created_at: format_timestamp(entity.created_at),
        }
    }
}

/// Top scores of one game.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Game the list belongs to.
    pub game: GameName,
    /// Best scores, highest first.
    pub entries: Vec<LeaderboardEntry>,
}

/// Whether a score would enter the current top list.
#[derive(Debug, Serialize, ToSchema)]
pub struct QualifiesResponse {
    /// Game checked.
    pub game: GameName,
    /// Candidate score.
    pub score: u32,
    /// True when the list has room or the score beats its last entry.
    pub qualifies: bool,
}
