use std::sync::Arc;

use axum::{
    Json,
    http::Uri,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::info;

use crate::api::not_found;
use crate::db::Database;

/// Everything a request handler may touch. Built once in `main` and handed
/// to the router.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api_token: Option<String>,
}

impl AppState {
    pub fn new(db: Database, api_token: Option<String>) -> Self {
        AppState {
            db: Arc::new(db),
            api_token,
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(json!({ "status": "ok" }))
}

pub async fn fallback(uri: Uri) -> Response {
    tracing::warn!(path = %uri.path(), "no route matched");
    not_found("Not found")
}
