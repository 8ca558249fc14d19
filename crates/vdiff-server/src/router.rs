use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;

/// Per-router state shared by the handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub default_context_lines: i64,
}

/// Build the axum router with all vdiff endpoints.
pub fn build_router(config: &ServerConfig) -> Router {
    let state = AppState {
        default_context_lines: config.default_context_lines,
    };
    let router = Router::new()
        .route("/", get(handler::root_handler))
        .route("/health", get(handler::health_handler))
        .route("/diff", post(handler::text_diff_handler))
        .route("/json-diff", post(handler::json_diff_handler))
        .route("/similarity", post(handler::similarity_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_input_bytes))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
