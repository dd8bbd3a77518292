use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the arcade score API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sessions::create_session,
        crate::routes::sessions::get_session,
        crate::routes::sessions::record_moves,
        crate::routes::sessions::abandon_session,
        crate::routes::scores::submit_score,
        crate::routes::leaderboard::get_leaderboard,
        crate::routes::leaderboard::get_qualifies,
        crate::routes::board::new_board,
        crate::routes::board::play_move,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::MethodNotAllowedResponse,
            crate::dto::session::CreateSessionRequest,
            crate::dto::session::RecordMovesRequest,
            crate::dto::session::SessionSummary,
            crate::dto::session::SessionStatusDto,
            crate::dto::score::SubmitScoreRequest,
            crate::dto::score::SubmissionResult,
            crate::dto::score::HighScoreSummary,
            crate::dto::leaderboard::LeaderboardResponse,
            crate::dto::leaderboard::LeaderboardEntry,
            crate::dto::leaderboard::QualifiesResponse,
            crate::dto::board::BoardMoveRequest,
            crate::dto::board::BoardMoveResponse,
            crate::dto::board::NewBoardResponse,
            crate::error::RejectionKind,
            crate::state::game::GameName,
            crate::state::board::Direction,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sessions", description = "Play session tracking"),
        (name = "scores", description = "High score submission"),
        (name = "leaderboard", description = "High score queries"),
        (name = "2048", description = "2048 board rules"),
    )
)]
/// OpenAPI document served at `/api-doc/openapi.json`.
pub struct ApiDoc;
