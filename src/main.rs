//! Arcade scores binary entrypoint wiring the REST API, the score store and the
//! session sweeper.

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use tokio::{net::TcpListener, time::interval};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arcade_scores_back::{
    config::AppConfig,
    dao::score_store::ScoreStore,
    routes,
    services::session_service,
    state::{AppState, SharedState},
};

/// How often abandoned sessions are looked for.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = build_store(&config)?;
    let app_state = AppState::new(store, config);

    tokio::spawn(run_session_sweeper(app_state.clone()));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

#[cfg(feature = "supabase-store")]
fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ScoreStore>> {
    use arcade_scores_back::dao::score_store::supabase::SupabaseScoreStore;

    let store = SupabaseScoreStore::new(config.store.clone(), config.store_timeout)
        .context("building score store client")?;
    info!(
        configured = config.store.configured,
        "using Supabase score store"
    );
    Ok(Arc::new(store))
}

#[cfg(not(feature = "supabase-store"))]
fn build_store(_config: &AppConfig) -> anyhow::Result<Arc<dyn ScoreStore>> {
    use arcade_scores_back::dao::score_store::memory::MemoryScoreStore;

    tracing::warn!("built without supabase-store; scores are kept in memory only");
    Ok(Arc::new(MemoryScoreStore::new()))
}

/// Periodically abandon sessions that outlived the configured TTL.
async fn run_session_sweeper(state: SharedState) {
    let mut ticker = interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        session_service::sweep_expired(&state);
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state).layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
