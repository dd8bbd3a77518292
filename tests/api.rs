use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use arcade_scores_back::{
    config::AppConfig,
    dao::score_store::memory::MemoryScoreStore,
    routes,
    state::{AppState, SharedState, game::GameName, session::GameSession},
};

fn app() -> (Router, MemoryScoreStore, SharedState) {
    let store = MemoryScoreStore::new();
    let state = AppState::new(Arc::new(store.clone()), AppConfig::default());
    (routes::router(state.clone()), store, state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_ok_when_store_answers() {
    let (app, _, _) = app();
    let (status, body) = send(&app, empty_request(Method::GET, "/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["service"], "arcade-scores");
    assert!(body["timestamp"].is_string());
    assert!(body["version"].is_string());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn health_degraded_when_store_fails() {
    let (app, store, _) = app();
    store.set_failing(true);
    let (status, body) = send(&app, empty_request(Method::GET, "/api/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "error");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn health_preflight_and_method_guard() {
    let (app, _, _) = app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/health")
        .header(header::ORIGIN, "https://portfolio.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://portfolio.example"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, OPTIONS"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type"
    );

    let response = app
        .clone()
        .oneshot(empty_request(Method::POST, "/api/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn health_refuses_head() {
    let (app, _, _) = app();

    for method in [Method::HEAD, Method::PUT, Method::DELETE] {
        let response = app
            .clone()
            .oneshot(empty_request(method.clone(), "/api/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type"
        );
    }
}

#[tokio::test]
async fn reported_engagement_submission_flow() {
    let (app, store, _) = app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/scores",
            json!({"game": "2048", "username": "ab1", "score": 120, "sessionDuration": 3500, "moves": 6}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["score"]["username"], "AB1");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/scores",
            json!({"game": "snake", "username": "ab1", "score": 120, "session_duration": 4000}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["rejection"], "engagement_too_low");
    assert!(body["reason"].is_string());

    assert_eq!(store.rows().len(), 1);
}

#[tokio::test]
async fn non_numeric_score_is_a_rejection() {
    let (app, _, _) = app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/scores",
            json!({"game": "flappy-bird", "username": "abc", "score": "lots"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["rejection"], "invalid_score");
}

#[tokio::test]
async fn store_outage_surfaces_error() {
    let (app, store, _) = app();
    store.set_failing(true);
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/scores",
            json!({"game": "2048", "username": "abc", "score": 10}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn tracked_session_submission_is_stored_and_closes_session() {
    let (app, store, state) = app();
    let mut session = GameSession::starting_at(
        GameName::TwentyFortyEight,
        Instant::now() - Duration::from_secs(5),
    );
    session.record_moves(6).unwrap();
    let session = state.register_session(session);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/scores",
            json!({"game": "2048", "username": "ab1", "score": 120, "sessionId": session.id}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["score"]["score"], 120);
    assert_eq!(state.live_sessions(), 0);
    assert_eq!(store.rows().len(), 1);
}

#[tokio::test]
async fn unknown_session_submission_is_not_found() {
    let (app, store, _) = app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/scores",
            json!({
                "game": "snake",
                "username": "abc",
                "score": 10,
                "sessionId": "5f0c7a4e-9b1d-4a39-8d0e-3f2b6c1a9e77"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn session_routes_track_moves() {
    let (app, _, state) = app();

    let (status, created) = send(
        &app,
        json_request(Method::POST, "/api/sessions", json!({"game": "snake"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["moves"], 0);
    assert_eq!(created["status"], "created");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, moved) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/sessions/{id}/moves"),
            json!({"count": 3}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["moves"], 3);
    assert_eq!(moved["status"], "active");

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/sessions/{id}/moves"),
            json!({"count": 0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, abandoned) =
        send(&app, empty_request(Method::DELETE, &format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(abandoned["status"], "abandoned");
    assert_eq!(state.live_sessions(), 0);

    let (status, _) = send(&app, empty_request(Method::GET, &format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tic_tac_toe_has_no_session_or_leaderboard() {
    let (app, _, _) = app();

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/sessions", json!({"game": "tic-tac-toe"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/leaderboard/tic-tac-toe")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leaderboard_ranks_and_validates_limit() {
    let (app, _, _) = app();
    for (username, score) in [("aaa", 50), ("bbb", 70)] {
        send(
            &app,
            json_request(
                Method::POST,
                "/api/scores",
                json!({"game": "memory-game", "username": username, "score": score}),
            ),
        )
        .await;
    }

    let (status, body) =
        send(&app, empty_request(Method::GET, "/api/leaderboard/memory-game?limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"], "memory-game");
    assert_eq!(body["entries"][0]["rank"], 1);
    assert_eq!(body["entries"][0]["username"], "BBB");
    assert_eq!(body["entries"][1]["score"], 50);

    let (status, _) =
        send(&app, empty_request(Method::GET, "/api/leaderboard/memory-game?limit=500")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        empty_request(
            Method::GET,
            "/api/leaderboard/memory-game/qualifies?score=60&limit=2",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qualifies"], true);
}

#[tokio::test]
async fn board_move_merges_and_spawns() {
    let (app, _, _) = app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/games/2048/move",
            json!({
                "board": [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
                "direction": "left"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moved"], true);
    assert_eq!(body["points"], 4);
    assert_eq!(body["board"][0][0], 4);
    let tiles = body["board"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|cell| cell.as_u64() != Some(0))
        .count();
    assert_eq!(tiles, 2);
}

#[tokio::test]
async fn board_move_refuses_impossible_tiles() {
    let (app, _, _) = app();

    for board in [
        json!([[2147483648u64, 2147483648u64, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        json!([[3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ] {
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/games/2048/move",
                json!({"board": board, "direction": "left"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}
