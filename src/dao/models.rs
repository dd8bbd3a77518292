use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::state::game::GameName;

/// High score row as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntity {
    /// Store-assigned primary key.
    pub id: i64,
    /// Game the score belongs to.
    pub game: GameName,
    /// Normalized three-character player tag.
    pub username: String,
    /// Final score.
    pub score: u32,
    /// Insertion time assigned by the store.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Row sent to the store when a submission is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewHighScoreEntity {
    /// Game the score belongs to.
    pub game: GameName,
    /// Normalized player tag.
    pub username: String,
    /// Validated score.
    pub score: u32,
}
