use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the score store once and describe the outcome.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "score store health check failed");
            HealthResponse::degraded(err.client_message())
        }
    }
}
