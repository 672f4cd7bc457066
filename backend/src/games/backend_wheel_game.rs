use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::persistence::{LoadValueResponse, SaveValueRequest};
use shared::validation::{validate_storage_key, validate_storage_value, validate_visitor_id};

use crate::error::Error;
use crate::AppState;

/// Per-visitor key-value storage behind the wheel's host store adapter
pub fn create_router() -> Router<AppState> {
    Router::new().route("/:visitor/:key", get(load_value).put(save_value))
}

fn check_path(visitor: &str, key: &str) -> Result<(), Error> {
    validate_visitor_id(visitor).map_err(|e| Error::InvalidInput(e.code.to_string()))?;
    validate_storage_key(key).map_err(|e| Error::InvalidInput(e.code.to_string()))?;
    Ok(())
}

async fn load_value(
    State(state): State<AppState>,
    Path((visitor, key)): Path<(String, String)>,
) -> Result<Json<LoadValueResponse>, Error> {
    check_path(&visitor, &key)?;

    let value = state.store.get(&visitor, &key).await?;
    tracing::debug!("Loaded {} for {}: {:?}", key, visitor, value);
    Ok(Json(LoadValueResponse { value }))
}

async fn save_value(
    State(state): State<AppState>,
    Path((visitor, key)): Path<(String, String)>,
    Json(request): Json<SaveValueRequest>,
) -> Result<StatusCode, Error> {
    check_path(&visitor, &key)?;
    validate_storage_value(&request.value).map_err(|e| Error::InvalidInput(e.code.to_string()))?;

    state.store.set(&visitor, &key, &request.value).await?;
    tracing::info!("Saved {}={} for {}", key, request.value, visitor);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreBackend;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router().with_state(AppState { store: StoreBackend::memory() })
    }

    fn put(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_value_is_null() {
        let response = app().oneshot(get("/visitor-1/wheel_spins_used")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({ "value": null }));
    }

    #[tokio::test]
    async fn test_saved_value_reads_back() {
        let app = app();

        let response = app
            .clone()
            .oneshot(put("/visitor-1/wheel_spins_used", r#"{"value":"1"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.clone().oneshot(get("/visitor-1/wheel_spins_used")).await.unwrap();
        assert_eq!(json_body(response).await, serde_json::json!({ "value": "1" }));

        // Other visitors are unaffected
        let response = app.oneshot(get("/visitor-2/wheel_spins_used")).await.unwrap();
        assert_eq!(json_body(response).await, serde_json::json!({ "value": null }));
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let response = app().oneshot(get("/visitor-1/bad%20key")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "invalid_storage_key" })
        );
    }

    #[tokio::test]
    async fn test_oversized_value_rejected() {
        let body = serde_json::json!({ "value": "x".repeat(1000) }).to_string();
        let response = app().oneshot(put("/visitor-1/prize_opened", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let response = app()
            .oneshot(put("/visitor-1/prize_opened", r#"{"val":true}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
