use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::api::unauthorized;
use crate::handler::AppState;

/// Rejects requests that do not present the configured API token.
/// With no token configured every request is let through.
pub async fn require_bearer_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.api_token.as_deref() else {
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    if presented != Some(expected) {
        tracing::error!(path = %req.uri().path(), "unauthorized request");
        return unauthorized();
    }

    next.run(req).await
}

fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}
