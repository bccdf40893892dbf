use axum::{
    Router,
    http::Method,
    middleware,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod auth;
pub mod bookmarks;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod sanitize;

use handler::{AppState, fallback, healthcheck};

/// Assembles the full HTTP surface around `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let api = bookmarks::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_bearer_token,
    ));

    Router::new()
        .route("/", get(healthcheck))
        .nest("/api", api)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
