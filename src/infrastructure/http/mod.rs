use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{health, history::HistoryController, tts::TtsController};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    tts_controller: Arc<TtsController>,
    history_controller: Arc<HistoryController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tts_routes = Router::new()
        .route("/api/tts/voices", get(TtsController::voices))
        .route("/api/tts/generate", post(TtsController::generate))
        .with_state(tts_controller);

    let history_routes = Router::new()
        .route(
            "/api/tts/history",
            get(HistoryController::list).post(HistoryController::save),
        )
        .route(
            "/api/tts/history/:historyId",
            delete(HistoryController::delete),
        )
        .with_state(history_controller);

    let health_routes = Router::new()
        .route("/api/", get(health::root))
        .route("/api/health", get(health::health))
        .route("/api/health/ready", get(health::health_ready))
        .with_state(pool.clone());

    let app = Router::new()
        .merge(health_routes)
        .merge(tts_routes)
        .merge(history_routes)
        .layer(build_cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http());

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
