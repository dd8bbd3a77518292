//! Validation helpers for score submissions.

use std::time::Duration;

use serde_json::Value;
use validator::ValidationError;

use crate::state::game::GameName;

/// Length of a player tag after normalization.
pub const USERNAME_LENGTH: usize = 3;
/// Sanity ceiling for any client-computed score.
pub const MAX_SCORE: f64 = 1_000_000.0;

/// Upper-case `raw` and drop everything outside `[A-Z0-9]`.
pub fn normalize_username(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Validates that a player tag normalizes to exactly three characters, returning the
/// normalized tag.
///
/// # Examples
///
/// ```ignore
/// validate_username("ab1!")      // Ok("AB1")
/// validate_username("a")         // Err - too short
/// validate_username("toolong12") // Err - too long
/// ```
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let normalized = normalize_username(raw);
    if normalized.len() != USERNAME_LENGTH {
        let mut err = ValidationError::new("username_length");
        err.message = Some(
            format!(
                "Username must contain exactly {USERNAME_LENGTH} letters or digits (got {})",
                normalized.len()
            )
            .into(),
        );
        return Err(err);
    }
    Ok(normalized)
}

/// Boolean form of [`validate_username`].
pub fn is_valid_username(raw: &str) -> bool {
    validate_username(raw).is_ok()
}

/// Validates that a score is a finite number within `[0, 1_000_000]`.
///
/// The stored score is the integral part of the value.
pub fn validate_score(score: f64) -> Result<u32, ValidationError> {
    if !score.is_finite() {
        let mut err = ValidationError::new("score_format");
        err.message = Some("Score must be a number".into());
        return Err(err);
    }
    if !(0.0..=MAX_SCORE).contains(&score) {
        let mut err = ValidationError::new("score_range");
        err.message = Some(format!("Score must be between 0 and {MAX_SCORE} (got {score})").into());
        return Err(err);
    }
    Ok(score.trunc() as u32)
}

/// Boolean form of [`validate_score`].
pub fn is_valid_score(score: f64) -> bool {
    validate_score(score).is_ok()
}

/// Validates a raw JSON score: anything but a number is rejected.
pub fn validate_score_value(value: &Value) -> Result<u32, ValidationError> {
    match value.as_f64() {
        Some(score) => validate_score(score),
        None => {
            let mut err = ValidationError::new("score_format");
            err.message = Some(format!("Score must be a number (got {value})").into());
            Err(err)
        }
    }
}

/// Validates that a play-through meets the engagement floor of its game.
///
/// Only the measurements that are present are compared.
pub fn validate_engagement(
    game: GameName,
    duration: Option<Duration>,
    moves: Option<u32>,
) -> Result<(), ValidationError> {
    let minimums = game.minimums();

    if let Some(duration) = duration {
        if duration < minimums.min_duration {
            let mut err = ValidationError::new("engagement_duration");
            err.message = Some(
                format!(
                    "Session too short for {game}: {} ms played, {} ms required",
                    duration.as_millis(),
                    minimums.min_duration.as_millis()
                )
                .into(),
            );
            return Err(err);
        }
    }

    if let Some(moves) = moves {
        if moves < minimums.min_moves {
            let mut err = ValidationError::new("engagement_moves");
            err.message = Some(
                format!(
                    "Too few moves for {game}: {moves} made, {} required",
                    minimums.min_moves
                )
                .into(),
            );
            return Err(err);
        }
    }

    Ok(())
}
