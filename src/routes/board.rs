//! 2048 board routes.

use axum::{
    Json, Router,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::board::{BoardMoveRequest, BoardMoveResponse, NewBoardResponse},
    error::AppError,
    services::board_service,
    state::SharedState,
};

/// 2048 board endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/games/2048/board", get(new_board))
        .route("/api/games/2048/move", post(play_move))
}

#[utoipa::path(
    get,
    path = "/api/games/2048/board",
    tag = "2048",
    responses((status = 200, description = "New board", body = NewBoardResponse))
)]
/// Deal a fresh board.
pub async fn new_board() -> Json<NewBoardResponse> {
    Json(board_service::new_board())
}

#[utoipa::path(
    post,
    path = "/api/games/2048/move",
    tag = "2048",
    request_body = BoardMoveRequest,
    responses(
        (status = 200, description = "Board after the move", body = BoardMoveResponse),
        (status = 400, description = "Board holds a tile 2048 cannot produce")
    )
)]
/// Slide and merge the board, spawning a tile when it changed.
pub async fn play_move(
    Json(payload): Json<BoardMoveRequest>,
) -> Result<Json<BoardMoveResponse>, AppError> {
    payload.validate()?;
    Ok(Json(board_service::play_move(payload)))
}
