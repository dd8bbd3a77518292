//! Scored games and their engagement floors.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Games that keep a leaderboard and accept score submissions.
///
/// Tic-tac-toe is played locally only and is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum GameName {
    /// `snake`
    #[serde(rename = "snake")]
    Snake,
    /// `2048`
    #[serde(rename = "2048")]
    TwentyFortyEight,
    /// `flappy-bird`
    #[serde(rename = "flappy-bird")]
    FlappyBird,
    /// `brick-breaker`
    #[serde(rename = "brick-breaker")]
    BrickBreaker,
    /// `memory-game`
    #[serde(rename = "memory-game")]
    MemoryGame,
}

/// Minimum engagement a play-through must show before its score is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMinimums {
    /// Shortest plausible session.
    pub min_duration: Duration,
    /// Fewest plausible player actions.
    pub min_moves: u32,
}

/// Raised when a game name does not belong to [`GameName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported game `{0}`")]
pub struct UnsupportedGame(pub String);

impl GameName {
    /// Every scored game, in display order.
    pub const ALL: [GameName; 5] = [
        GameName::Snake,
        GameName::TwentyFortyEight,
        GameName::FlappyBird,
        GameName::BrickBreaker,
        GameName::MemoryGame,
    ];

    /// Wire identifier used in URLs, payloads and the store.
    pub fn as_str(self) -> &'static str {
        match self {
            GameName::Snake => "snake",
            GameName::TwentyFortyEight => "2048",
            GameName::FlappyBird => "flappy-bird",
            GameName::BrickBreaker => "brick-breaker",
            GameName::MemoryGame => "memory-game",
        }
    }

    /// Engagement floor for this game.
    pub fn minimums(self) -> GameMinimums {
        let (min_duration_ms, min_moves) = match self {
            GameName::Snake => (5_000, 10),
            GameName::TwentyFortyEight => (3_000, 5),
            GameName::FlappyBird => (3_000, 3),
            GameName::BrickBreaker => (5_000, 5),
            GameName::MemoryGame => (5_000, 8),
        };
        GameMinimums {
            min_duration: Duration::from_millis(min_duration_ms),
            min_moves,
        }
    }
}

impl fmt::Display for GameName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameName {
    type Err = UnsupportedGame;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GameName::ALL
            .into_iter()
            .find(|game| game.as_str() == value)
            .ok_or_else(|| UnsupportedGame(value.to_owned()))
    }
}

/// Whether `value` names a game that accepts score submissions.
pub fn is_valid_game_name(value: &str) -> bool {
    value.parse::<GameName>().is_ok()
}
