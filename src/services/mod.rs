/// 2048 board moves.
pub mod board_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read-only leaderboard projections.
pub mod leaderboard_service;
/// Score submission pipeline.
pub mod score_service;
/// Game session lifecycle.
pub mod session_service;
