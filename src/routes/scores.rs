use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::score::{SubmissionResult, SubmitScoreRequest},
    error::AppError,
    services::score_service::{self, SubmissionOutcome},
    state::SharedState,
};

/// Score submission endpoint.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/scores", post(submit_score))
}

#[utoipa::path(
    post,
    path = "/api/scores",
    tag = "scores",
    request_body = SubmitScoreRequest,
    responses(
        (status = 201, description = "Score stored", body = SubmissionResult),
        (status = 422, description = "Submission rejected by validation", body = SubmissionResult),
        (status = 503, description = "Score store unavailable", body = SubmissionResult),
        (status = 400, description = "Session belongs to another game"),
        (status = 404, description = "Unknown session")
    )
)]
/// Validate a final score and store it when accepted.
pub async fn submit_score(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<SubmissionResult>), AppError> {
    let outcome = score_service::submit_score(&state, payload).await?;
    let (status, body) = match outcome {
        SubmissionOutcome::Accepted(row) => (
            StatusCode::CREATED,
            SubmissionResult::accepted(row.into()),
        ),
        SubmissionOutcome::Rejected(rejection) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            SubmissionResult::rejected(&rejection),
        ),
        SubmissionOutcome::Failed(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            SubmissionResult::failed(error),
        ),
    };
    Ok((status, Json(body)))
}
