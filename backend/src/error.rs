use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum Error {
    /// Malformed visitor id, key or value
    InvalidInput(String),
    /// The backing store failed or could not be reached
    Store(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            Error::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Store(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidInput(code) => (StatusCode::BAD_REQUEST, code.clone()),
            Error::Store(e) => {
                tracing::error!("Storage request failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
