use axum::{
    Router,
    http::{Method, header},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::state::SharedState;

pub mod board;
/// Swagger UI and the OpenAPI document.
pub mod docs;
pub mod health;
/// Leaderboard reads.
pub mod leaderboard;
/// Score submission.
pub mod scores;
/// Session tracking.
pub mod sessions;

/// Compose all route trees, wiring in shared state and documentation routes.
///
/// The health route answers CORS itself; every other API route goes through
/// [`CorsLayer`].
pub fn router(state: SharedState) -> Router<()> {
    let api_router = sessions::router()
        .merge(scores::router())
        .merge(leaderboard::router())
        .merge(board::router())
        .layer(cors_layer());

    health::router()
        .merge(api_router)
        .merge(docs::router())
        .with_state(state)
}

/// Echo the caller's origin, mirroring the health route's permissive policy.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
