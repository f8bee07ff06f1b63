//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin), request tracing, and a body limit on the
//! upload route. When `server.web_dir` points at an existing directory, a
//! prebuilt web UI is served from it with an `index.html` fallback.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.config.server.max_upload_bytes;
    let web_dir = state.config.server.web_dir.clone();

    let mut router = Router::new()
        .route(
            "/api/infer",
            post(handlers::infer::infer).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(web_dir) = web_dir {
        if std::path::Path::new(&web_dir).is_dir() {
            let index_path = format!("{web_dir}/index.html");
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "static web UI enabled");
        } else {
            tracing::warn!(path = %web_dir, "web_dir does not exist, serving API only");
        }
    }

    router
}
