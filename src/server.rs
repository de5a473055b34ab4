// src/server.rs
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::corpus;
use crate::extractors;
use crate::utils::error::{AppError, ExtractError};

/// Opaque failure message sent to HTTP clients when retrieval or parsing
/// fails. The structured cause is logged server-side, never put on the wire.
pub const FAILURE_MESSAGE: &str = "I felt a great disturbance in the Force, as if millions of requests suddenly cried out in terror and were suddenly silenced.";

struct AppState {
    config: ServerConfig,
}

/// Builds the service router: the four CEX routes, a liveness root, and
/// the static file mount.
pub fn router(config: ServerConfig, static_dir: PathBuf) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(index))
        .route("/cex/{source}/urns", get(return_urns))
        .route("/cex/{source}/urns/{filter}", get(return_filtered_urns))
        .route("/cex/{source}/nodes", get(return_nodes))
        .route("/cex/{source}/nodes/{filter}", get(return_filtered_nodes))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves until ctrl-c or SIGTERM.
pub async fn serve(config: ServerConfig, static_dir: PathBuf) -> Result<(), AppError> {
    let addr = config.listen_addr();
    let app = router(config, static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening at {}...", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler");
        signal.recv().await;
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}

async fn index() -> &'static str {
    "Online!"
}

async fn return_urns(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Response {
    cex_response(&state, &source, None, extractors::get_identifiers).await
}

async fn return_filtered_urns(
    State(state): State<Arc<AppState>>,
    Path((source, filter)): Path<(String, String)>,
) -> Response {
    cex_response(&state, &source, Some(&filter), extractors::get_identifiers).await
}

async fn return_nodes(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Response {
    cex_response(&state, &source, None, extractors::get_nodes).await
}

async fn return_filtered_nodes(
    State(state): State<Arc<AppState>>,
    Path((source, filter)): Path<(String, String)>,
) -> Response {
    cex_response(&state, &source, Some(&filter), extractors::get_nodes).await
}

/// Fetches the requested document, runs the given projection over it, and
/// renders the result. Every failure collapses to the one opaque sentinel
/// on the wire; the distinct cause goes to the log.
async fn cex_response<T: Serialize>(
    state: &AppState,
    source: &str,
    filter: Option<&str>,
    project: fn(&str, Option<&str>) -> Result<Vec<T>, ExtractError>,
) -> Response {
    let url = state.config.source_url(source);

    let result: Result<Vec<T>, AppError> = async {
        let document = corpus::fetch_document(&url).await?;
        Ok(project(&document, filter)?)
    }
    .await;

    match result {
        Ok(values) => Json(values).into_response(),
        Err(err) => {
            tracing::error!("Request for {} failed: {}", url, err);
            FAILURE_MESSAGE.into_response()
        }
    }
}
