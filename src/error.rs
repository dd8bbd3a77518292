//! Rejections and the error chain from services up to HTTP responses.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

use crate::{dao::storage::StorageError, state::session::SessionError};

/// Why a score submission was refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The game does not keep a leaderboard.
    #[error("{0}")]
    UnsupportedGame(String),
    /// The player tag does not normalize to three characters.
    #[error("{0}")]
    InvalidUsername(String),
    /// The score is not a number within the accepted range.
    #[error("{0}")]
    InvalidScore(String),
    /// The session is shorter or has fewer moves than the game's floor.
    #[error("{0}")]
    EngagementTooLow(String),
}

/// Machine-readable rejection category exposed next to the human message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// See [`Rejection::UnsupportedGame`].
    UnsupportedGame,
    /// See [`Rejection::InvalidUsername`].
    InvalidUsername,
    /// See [`Rejection::InvalidScore`].
    InvalidScore,
    /// See [`Rejection::EngagementTooLow`].
    EngagementTooLow,
}

impl Rejection {
    /// Category of this rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::UnsupportedGame(_) => RejectionKind::UnsupportedGame,
            Rejection::InvalidUsername(_) => RejectionKind::InvalidUsername,
            Rejection::InvalidScore(_) => RejectionKind::InvalidScore,
            Rejection::EngagementTooLow(_) => RejectionKind::EngagementTooLow,
        }
    }

    /// Human-readable reason shown to the player.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    pub(crate) fn from_validation(
        wrap: fn(String) -> Rejection,
        err: ValidationError,
    ) -> Rejection {
        let message = err
            .message
            .map(|message| message.into_owned())
            .unwrap_or_else(|| err.code.into_owned());
        wrap(message)
    }
}

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<SessionError> for ServiceError {
    fn from(err: SessionError) -> Self {
        ServiceError::InvalidState(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => {
                AppError::ServiceUnavailable(source.client_message())
            }
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
