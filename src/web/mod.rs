use crate::db::Store;
use axum::{Json, Router, extract::DefaultBodyLimit, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod errors;
mod extract;
mod handlers;
pub mod openapi;

pub use errors::AppError;

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Listener and middleware options for [`serve`] and [`create_router`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Allow any origin. Off by default.
    pub cors_permissive: bool,
    /// Largest accepted request body in bytes. `None` removes the limit.
    pub max_body_bytes: Option<usize>,
    /// Server URL advertised in `/openapi.json`.
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8888)),
            cors_permissive: false,
            max_body_bytes: None,
            public_url: openapi::DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

/// Build the axum router with all routes.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let doc = Arc::new(openapi::document(&config.public_url));
    let body_limit = match config.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route(
            "/todos/",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{todo_id}",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(
            "/openapi.json",
            get(move || {
                let doc = Arc::clone(&doc);
                async move { Json(doc.as_ref().clone()) }
            }),
        )
        .layer(body_limit)
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        tracing::warn!("CORS: permissive mode enabled, all origins allowed");
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}

/// Migrate the store, then serve until Ctrl+C or SIGTERM.
pub async fn serve(store: Store, config: &ServerConfig) -> Result<(), String> {
    store
        .migrate()
        .map_err(|e| format!("failed to prepare database: {e}"))?;
    tracing::info!(db = %store.path().display(), "database ready");

    let app = create_router(AppState { store }, config);

    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind to {addr}: {e}"))?;
    tracing::info!("todos API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
