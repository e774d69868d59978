pub mod routes;
pub mod ws;

use crate::state::AppState;
use axum::routing::get;
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> axum::Router {
    let dist = state.config.dashboard_dir.clone();

    axum::Router::new()
        .route("/api/snapshot", get(routes::get_snapshot))
        .route("/api/accounts", get(routes::get_accounts))
        .route("/api/dashboard", get(routes::get_dashboard))
        .route("/api/counters", get(routes::get_counters))
        .route("/ws", get(ws::ws_handler))
        .fallback_service(
            tower_http::services::ServeDir::new(&dist)
                .fallback(tower_http::services::ServeFile::new(dist.join("index.html"))),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
