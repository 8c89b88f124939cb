use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

// Handler-level errors mapped to HTTP status codes. The gate itself has no
// failure modes; a deny shows up here only as TooManyRequests.
#[derive(Debug)]
pub enum ApiError {
    // Missing or empty caller identity (400)
    BadRequest(String),
    // Admission denied for this key (429)
    TooManyRequests(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
