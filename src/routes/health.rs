//! Health endpoint with its own CORS and method handling.

use axum::{
    Json, Router,
    extract::State,
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
        },
    },
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::health::{HealthResponse, MethodNotAllowedResponse},
    services::health_service,
    state::SharedState,
};

/// CORS headers attached to every health response.
///
/// The request origin is echoed back, or `*` when none is sent.
fn cors_headers(headers: &HeaderMap) -> [(HeaderName, HeaderValue); 3] {
    let origin = headers
        .get(ORIGIN)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, origin),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
    ]
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Score store reachable", body = HealthResponse),
        (status = 503, description = "Score store unreachable", body = HealthResponse),
        (status = 405, description = "Unsupported method", body = MethodNotAllowedResponse)
    )
)]
/// Probe the score store and report service status.
pub async fn healthcheck(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let status = health_service::health_status(&state).await;
    let code = if status.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, cors_headers(&headers), Json(status)).into_response()
}

/// Answer CORS preflight requests with an empty body.
async fn preflight(headers: HeaderMap) -> Response {
    (StatusCode::NO_CONTENT, cors_headers(&headers)).into_response()
}

async fn method_not_allowed(headers: HeaderMap) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        cors_headers(&headers),
        Json(MethodNotAllowedResponse::default()),
    )
        .into_response()
}

/// Configure the health routes subtree.
///
/// HEAD is routed explicitly, otherwise axum would answer it with the GET handler.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route(
        "/api/health",
        get(healthcheck)
            .head(method_not_allowed)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}
