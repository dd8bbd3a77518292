use std::time::SystemTime;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::{SERVICE_NAME, SERVICE_VERSION},
    dto::format_system_time,
};

/// Health response returned by the `/api/health` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// RFC3339 time the probe ran.
    pub timestamp: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Store reachability ("connected" or "error").
    pub database: String,
    /// Store failure message, present only when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    /// Create a health response indicating the store answered.
    pub fn ok() -> Self {
        Self::new("ok", "connected", None)
    }

    /// Create a health response indicating the store could not be reached.
    pub fn degraded(error: String) -> Self {
        Self::new("degraded", "error", Some(error))
    }

    /// True when the store answered the probe.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    fn new(status: &str, database: &str, error: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            timestamp: format_system_time(SystemTime::now()),
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            database: database.to_string(),
            error,
        }
    }
}

/// Body returned for unsupported HTTP methods.
#[derive(Debug, Serialize, ToSchema)]
pub struct MethodNotAllowedResponse {
    /// Always `Method not allowed`.
    pub error: String,
}

impl Default for MethodNotAllowedResponse {
    fn default() -> Self {
        Self {
            error: "Method not allowed".to_string(),
        }
    }
}
