// REST routes under /api/v1

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::AppState;
use crate::error::PlaylistError;
use crate::models::PlaylistRequest;
use crate::playlist::PlaylistResult;

pub const HEALTH_MESSAGE: &str = "JamCast API is running!";

pub const INFO_MESSAGE: &str = r#"JamCast API - Weather-based Spotify Playlist Generator

Endpoints:
- POST /api/v1/playlist - Generate playlist based on city weather
- GET /api/v1/health - Health check
- GET /api/v1/info - This information

Example request:
{
    "city": "Chicago"
}
"#;

/// POST /api/v1/playlist
pub async fn generate_playlist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlaylistRequest>, JsonRejection>,
) -> Result<Json<PlaylistResult>, PlaylistError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Validation error");
        PlaylistError::field("body", "Request body must be a JSON object with a city field")
    })?;
    let city = request
        .validate()
        .inspect_err(|e| warn!(error = %e, "Validation error"))?
        .to_string();

    info!(city = %city, "Received playlist request");

    // The upstream calls block, so the pipeline runs off the async workers
    let worker_city = city.clone();
    let playlist = tokio::task::spawn_blocking(move || {
        state.generator.generate_playlist(&worker_city)
    })
    .await
    .map_err(|e| {
        error!(city = %city, error = %e, "Playlist worker failed");
        PlaylistError::Unexpected(e.to_string())
    })?
    .inspect_err(|e| error!(city = %city, error = %e, "Error processing playlist request"))?;

    info!(city = %city, tracks = playlist.tracks.len(), "Successfully generated playlist");
    Ok(Json(playlist))
}

/// GET /api/v1/health
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// GET /api/v1/info
pub async fn info() -> &'static str {
    INFO_MESSAGE
}
