use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const NOT_FOUND_MESSAGE: &str = "Bookmark doesn't exist";
pub const SERVER_ERROR_MESSAGE: &str = "server error";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

/// `{"error": {"message": "..."}}`, the body of every failed request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(msg: &str) -> Self {
        ErrorResponse {
            error: ErrorMessage {
                message: msg.to_owned(),
            },
        }
    }
}

pub fn error_response(status: StatusCode, msg: &str) -> Response {
    (status, Json(ErrorResponse::new(msg))).into_response()
}

pub fn bad_request(msg: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, msg)
}

pub fn not_found(msg: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, msg)
}

pub fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
}

pub fn server_error() -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
}
