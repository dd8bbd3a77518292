use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::session::{CreateSessionRequest, RecordMovesRequest, SessionSummary},
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Session lifecycle endpoints used while a game is being played.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/{id}",
            get(get_session).delete(abandon_session),
        )
        .route("/api/sessions/{id}/moves", post(record_moves))
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session started", body = SessionSummary),
        (status = 400, description = "Game does not keep scores")
    )
)]
/// Start tracking a play-through.
pub async fn create_session(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionSummary>), AppError> {
    let summary = session_service::create_session(&state, payload)?;
    Ok((StatusCode::CREATED, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Live session", body = SessionSummary),
        (status = 404, description = "Unknown or ended session")
    )
)]
/// Return a live session.
pub async fn get_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = session_service::get_session(&state, id)?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/moves",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = RecordMovesRequest,
    responses(
        (status = 200, description = "Moves recorded", body = SessionSummary),
        (status = 400, description = "Invalid move count"),
        (status = 404, description = "Unknown or ended session")
    )
)]
/// Record player actions on a live session.
pub async fn record_moves(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordMovesRequest>,
) -> Result<Json<SessionSummary>, AppError> {
    payload.validate()?;
    let summary = session_service::record_moves(&state, id, payload.count)?;
    Ok(Json(summary))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session abandoned", body = SessionSummary),
        (status = 404, description = "Unknown or ended session")
    )
)]
/// End a session without submitting a score.
pub async fn abandon_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = session_service::abandon_session(&state, id)?;
    Ok(Json(summary))
}
