// HTTP API for playlist generation
// Every failure is answered with the ErrorBody JSON shape, never a raw upstream payload.

pub mod routes;

use crate::config::Config;
use crate::error::PlaylistError;
use crate::playlist::PlaylistGenerator;
use anyhow::Context;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for the API; read-only after startup
pub struct AppState {
    pub generator: PlaylistGenerator,
}

impl IntoResponse for PlaylistError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_body())).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/playlist", post(routes::generate_playlist))
        .route("/health", get(routes::health))
        .route("/info", get(routes::info))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_router)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until Ctrl-C
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        generator: PlaylistGenerator::from_config(&config),
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %listener.local_addr()?, "JamCast API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockRecommendationSource, MockWeatherSource};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    // Requests that fail before the pipeline runs must never reach either upstream
    fn untouched_router() -> Router {
        let mut weather = MockWeatherSource::new();
        weather.expect_fetch_weather().times(0);
        let mut catalog = MockRecommendationSource::new();
        catalog.expect_fetch_recommendations().times(0);
        router(Arc::new(AppState {
            generator: PlaylistGenerator::new(Arc::new(weather), Arc::new(catalog)),
        }))
    }

    fn post_playlist(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/api/v1/playlist");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = untouched_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unreadable_bodies_rejected_on_body_field() {
        let requests = [
            post_playlist(Some("application/json"), "not json"),
            post_playlist(None, r#"{"city":"Chicago"}"#),
            post_playlist(Some("application/json"), r#"{"city":5}"#),
            post_playlist(Some("application/json"), "[]"),
        ];

        for request in requests {
            let (status, body) = send(request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Validation failed");
            assert_eq!(body["status"], 400);
            assert_eq!(
                body["fieldErrors"]["body"],
                "Request body must be a JSON object with a city field"
            );
            assert!(body["fieldErrors"].get("city").is_none());
        }
    }

    #[tokio::test]
    async fn test_missing_city_rejected_on_city_field() {
        let (status, body) = send(post_playlist(Some("application/json"), "{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fieldErrors"]["city"], "City name is required");
        assert!(body["fieldErrors"].get("body").is_none());
    }

    #[tokio::test]
    async fn test_health_and_info_routes() {
        let health = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let response = untouched_router().oneshot(health).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"JamCast API is running!");

        let info = Request::builder()
            .uri("/api/v1/info")
            .body(Body::empty())
            .unwrap();
        let response = untouched_router().oneshot(info).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("POST /api/v1/playlist"));
    }

    #[tokio::test]
    async fn test_routes_outside_prefix_not_found() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = untouched_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = untouched_router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let preflight = Request::builder()
            .method("OPTIONS")
            .uri("/api/v1/playlist")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = untouched_router().oneshot(preflight).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
