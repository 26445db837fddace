//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::SharedSession;
use crate::api::{self, AppState};

/// Build the full axum router: the JSON API under `/api/*` plus optional
/// static files.
pub fn build_router(session: SharedSession, static_dir: Option<PathBuf>) -> Router {
    let app_state = AppState { session };

    // CORS layer for a front-end dev server on a different port.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/options", get(api::get_options))
        .route("/api/templates", get(api::get_templates))
        .route("/api/examples", get(api::get_examples))
        .route("/api/history", get(api::get_history))
        .route("/api/history/{id}", get(api::get_history_entry))
        .route("/api/assemble", post(api::post_assemble))
        .route("/api/generate", post(api::post_generate))
        .with_state(app_state);

    let mut router = Router::new().merge(api_routes).layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Bind, spawn the server, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("Listening on http://{addr}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Server error: {e}");
        }
    });

    Ok(addr)
}
