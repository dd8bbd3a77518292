//! Read-only projections of the high-score table.

use crate::{
    dto::leaderboard::{LeaderboardEntry, LeaderboardResponse, QualifiesResponse},
    error::ServiceError,
    state::{SharedState, game::GameName},
};

fn parse_game(game: &str) -> Result<GameName, ServiceError> {
    game.parse::<GameName>()
        .map_err(|err| ServiceError::NotFound(err.to_string()))
}

fn resolve_limit(state: &SharedState, limit: Option<u32>) -> u32 {
    limit.unwrap_or(state.config().leaderboard_default_limit)
}

/// Ranked top scores of `game`, highest first.
pub async fn top_scores(
    state: &SharedState,
    game: &str,
    limit: Option<u32>,
) -> Result<LeaderboardResponse, ServiceError> {
    let game = parse_game(game)?;
    let rows = state
        .store()
        .top_scores(game, resolve_limit(state, limit))
        .await?;

    let entries = rows
        .into_iter()
        .zip(1..)
        .map(|(row, rank)| LeaderboardEntry::ranked(rank, row))
        .collect();
    Ok(LeaderboardResponse { game, entries })
}

/// Whether `score` would enter the current top list of `game`.
///
/// A list with free slots admits any score; a full one needs a strictly higher score
/// than its last entry.
pub async fn qualifies(
    state: &SharedState,
    game: &str,
    score: u32,
    limit: Option<u32>,
) -> Result<QualifiesResponse, ServiceError> {
    let game = parse_game(game)?;
    let limit = resolve_limit(state, limit);
    let rows = state.store().top_scores(game, limit).await?;

    let qualifies = rows.len() < limit as usize
        || rows.last().is_none_or(|lowest| score > lowest.score);
    Ok(QualifiesResponse {
        game,
        score,
        qualifies,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::NewHighScoreEntity,
            score_store::{ScoreStore, memory::MemoryScoreStore},
        },
        state::AppState,
    };

    async fn seeded() -> SharedState {
        let store = MemoryScoreStore::new();
        for (username, score) in [("AAA", 100), ("BBB", 300), ("CCC", 200)] {
            store
                .insert_score(NewHighScoreEntity {
                    game: GameName::BrickBreaker,
                    username: username.into(),
                    score,
                })
                .await
                .unwrap();
        }
        AppState::new(Arc::new(store), AppConfig::default())
    }

    #[tokio::test]
    async fn entries_are_ranked() {
        let state = seeded().await;
        let board = top_scores(&state, "brick-breaker", Some(2)).await.unwrap();

        let ranks: Vec<(u32, &str)> = board
            .entries
            .iter()
            .map(|entry| (entry.rank, entry.username.as_str()))
            .collect();
        assert_eq!(ranks, [(1, "BBB"), (2, "CCC")]);
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let state = seeded().await;
        assert!(matches!(
            top_scores(&state, "tic-tac-toe", None).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn qualification_against_full_and_open_lists() {
        let state = seeded().await;

        assert!(qualifies(&state, "brick-breaker", 1, None).await.unwrap().qualifies);
        assert!(!qualifies(&state, "brick-breaker", 100, Some(3)).await.unwrap().qualifies);
        assert!(qualifies(&state, "brick-breaker", 101, Some(3)).await.unwrap().qualifies);
    }
}
