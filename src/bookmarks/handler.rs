//! HTTP Handlers for the Bookmarks API

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::Bookmarks;
use super::validate::{BookmarkFields, validate_new, validate_patch};
use crate::api::{NOT_FOUND_MESSAGE, bad_request, not_found, server_error};
use crate::error::ValidationError;
use crate::handler::AppState;
use crate::model::Bookmark;

const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// An empty body, or any JSON that is not an object, reads as an empty field
/// set so the field rules, not the JSON parser, decide what is missing.
fn read_fields(body: &[u8]) -> Result<BookmarkFields, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BookmarkFields::default());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("rejected request body: {}", e);
        bad_request(INVALID_JSON_MESSAGE)
    })?;

    let Value::Object(map) = value else {
        tracing::warn!("request body is not a JSON object");
        return Ok(BookmarkFields::default());
    };

    Ok(BookmarkFields::from_map(map))
}

/// Ids that are not integers cannot name a bookmark.
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn rejected(err: ValidationError) -> Response {
    tracing::warn!(field = err.field(), "invalid bookmark: {}", err);
    bad_request(&err.to_string())
}

fn missing(id: &str) -> Response {
    tracing::error!("Bookmark with id {} not found.", id);
    not_found(NOT_FOUND_MESSAGE)
}

fn failed(action: &str, err: anyhow::Error) -> Response {
    tracing::error!("Failed to {}: {:#}", action, err);
    server_error()
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Response {
    let store = Bookmarks::new(state.db.connection());

    match store.list_all().await {
        Ok(bookmarks) => {
            let body: Vec<Bookmark> = bookmarks.iter().map(Bookmark::sanitized).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => failed("list bookmarks", e),
    }
}

pub async fn create_bookmark(State(state): State<AppState>, body: Bytes) -> Response {
    let fields = match read_fields(&body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let input = match validate_new(fields) {
        Ok(input) => input,
        Err(e) => return rejected(e),
    };

    let store = Bookmarks::new(state.db.connection());

    match store.insert(input).await {
        Ok(bookmark) => {
            tracing::info!("Bookmark with id {} created.", bookmark.id);
            let location = format!("/api/bookmarks/{}", bookmark.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(bookmark.sanitized()),
            )
                .into_response()
        }
        Err(e) => failed("create bookmark", e),
    }
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(bookmark_id) = parse_id(&id) else {
        return missing(&id);
    };
    let store = Bookmarks::new(state.db.connection());

    match store.get_by_id(bookmark_id).await {
        Ok(Some(bookmark)) => (StatusCode::OK, Json(bookmark.sanitized())).into_response(),
        Ok(None) => missing(&id),
        Err(e) => failed("get bookmark", e),
    }
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(bookmark_id) = parse_id(&id) else {
        return missing(&id);
    };
    let store = Bookmarks::new(state.db.connection());

    match store.delete_by_id(bookmark_id).await {
        Ok(true) => {
            tracing::info!("Bookmark with id {} deleted.", bookmark_id);
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => missing(&id),
        Err(e) => failed("delete bookmark", e),
    }
}

/// The field check runs before the lookup, so an empty patch is a 400 even
/// for an id that does not exist.
pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let fields = match read_fields(&body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let patch = match validate_patch(fields) {
        Ok(patch) => patch,
        Err(e) => return rejected(e),
    };
    let Some(bookmark_id) = parse_id(&id) else {
        return missing(&id);
    };

    let store = Bookmarks::new(state.db.connection());

    match store.update_by_id(bookmark_id, patch).await {
        Ok(0) => missing(&id),
        Ok(_) => {
            tracing::info!("Bookmark with id {} updated.", bookmark_id);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => failed("update bookmark", e),
    }
}
