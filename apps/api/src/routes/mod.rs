pub mod health;

use axum::{routing::get, routing::post, Router};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::strategy::handlers;

pub fn build_router(state: AppState) -> Router {
    // Everything that is not the API is the static portfolio page
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/strategy",
            post(handlers::handle_generate_strategy),
        )
        .fallback_service(static_files)
        .with_state(state)
}
