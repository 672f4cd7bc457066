use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::State;
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};

use shared::constants::{HEALTH_ENDPOINT, STORAGE_ENDPOINT};

use crate::games::backend_wheel_game::create_router as create_storage_router;
use crate::store::StoreBackend;

mod error;
mod games;
mod logging;
mod store;

#[derive(Clone)]
pub struct AppState {
    store: StoreBackend,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
        }
    }
}

fn cors_layer() -> CorsLayer {
    let origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://127.0.0.1:8080,http://127.0.0.1:3000".to_string())
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(vec![Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers(vec![HeaderName::from_static("content-type")])
}

fn build_app(state: AppState, static_dir: PathBuf) -> Router {
    let index = static_dir.join("index.html");
    let static_service = ServeDir::new(&static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route(HEALTH_ENDPOINT, get(health_check))
        .nest(STORAGE_ENDPOINT, create_storage_router())
        .layer(cors_layer())
        .fallback_service(static_service)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let state = AppState {
        store: StoreBackend::from_env()?,
    };
    if let Err(e) = state.store.ping().await {
        error!("Storage not reachable at startup: {}", e);
    }

    let static_dir = PathBuf::from(
        std::env::var("STATIC_DIR").unwrap_or_else(|_| "../frontend/dist".to_string()),
    );
    if !static_dir.exists() {
        info!("Static directory {} does not exist yet", static_dir.display());
    }

    let app = build_app(state, static_dir);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_with_memory_store() {
        let app = build_app(AppState { store: StoreBackend::memory() }, PathBuf::from("missing-dist"));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_storage_routes_are_nested() {
        let app = build_app(AppState { store: StoreBackend::memory() }, PathBuf::from("missing-dist"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/storage/visitor-1/wheel_spins_used")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-cache"))
        );
    }
}
