use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use validator::Validate;

use crate::{
    dto::leaderboard::{LeaderboardQuery, LeaderboardResponse, QualifiesQuery, QualifiesResponse},
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

/// Public read-only leaderboard endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/leaderboard/{game}", get(get_leaderboard))
        .route("/api/leaderboard/{game}/qualifies", get(get_qualifies))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/{game}",
    tag = "leaderboard",
    params(("game" = String, Path, description = "Game wire name"), LeaderboardQuery),
    responses(
        (status = 200, description = "Top scores", body = LeaderboardResponse),
        (status = 404, description = "Game does not keep scores"),
        (status = 503, description = "Score store unavailable")
    )
)]
/// Return the best scores of a game, highest first.
pub async fn get_leaderboard(
    State(state): State<SharedState>,
    Path(game): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    query.validate()?;
    let payload = leaderboard_service::top_scores(&state, &game, query.limit).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/{game}/qualifies",
    tag = "leaderboard",
    params(("game" = String, Path, description = "Game wire name"), QualifiesQuery),
    responses(
        (status = 200, description = "Qualification verdict", body = QualifiesResponse),
        (status = 404, description = "Game does not keep scores"),
        (status = 503, description = "Score store unavailable")
    )
)]
/// Tell whether a score would enter the current top list.
pub async fn get_qualifies(
    State(state): State<SharedState>,
    Path(game): Path<String>,
    Query(query): Query<QualifiesQuery>,
) -> Result<Json<QualifiesResponse>, AppError> {
    query.validate()?;
    let payload =
        leaderboard_service::qualifies(&state, &game, query.score, query.limit).await?;
    Ok(Json(payload))
}
