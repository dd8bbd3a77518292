use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod board;
/// Health check payloads.
pub mod health;
/// Leaderboard queries and responses.
pub mod leaderboard;
pub mod score;
/// Session tracking payloads.
pub mod session;
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    format_timestamp(OffsetDateTime::from(time))
}

fn format_timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
