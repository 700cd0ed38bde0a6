use super::{
    PlaylistResult, PlaylistTrack, UNKNOWN_CONDITION, map_to_mood, title_for, to_playlist_tracks,
};
use crate::client::{
    RecommendationClient, RecommendationQuery, RecommendationSource, WeatherClient, WeatherSource,
};
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;
use tracing::{error, info};

/// Main playlist generator: weather, then mood, then recommendations
#[derive(Clone)]
pub struct PlaylistGenerator {
    weather: Arc<dyn WeatherSource>,
    recommendations: Arc<dyn RecommendationSource>,
}

impl PlaylistGenerator {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        recommendations: Arc<dyn RecommendationSource>,
    ) -> Self {
        Self {
            weather,
            recommendations,
        }
    }

    /// Generator backed by the live OpenWeatherMap and Spotify clients
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(WeatherClient::new(&config.weather, config.timeout)),
            Arc::new(RecommendationClient::new(&config.spotify, config.timeout)),
        )
    }

    /// Generate a playlist for a city.
    ///
    /// The recommendation call is only made once the weather call has succeeded,
    /// and a failure in either aborts the whole run.
    pub fn generate_playlist(&self, city: &str) -> Result<PlaylistResult> {
        info!(city, "Starting playlist generation");

        let snapshot = self
            .weather
            .fetch_weather(city)
            .inspect_err(|e| error!(city, error = %e, "Error generating playlist"))?;

        let mood = map_to_mood(&snapshot);
        let playlist_title = title_for(mood, city);
        let weather_condition = snapshot
            .condition_main()
            .unwrap_or(UNKNOWN_CONDITION)
            .to_string();
        info!(city, %mood, %weather_condition, %playlist_title, "Mapped weather to mood");

        let candidates = self
            .recommendations
            .fetch_recommendations(&RecommendationQuery::for_mood(mood))
            .inspect_err(|e| error!(city, %mood, error = %e, "Error generating playlist"))?;

        let tracks = to_playlist_tracks(candidates);
        info!(city, %mood, tracks = tracks.len(), "Generated playlist");

        Ok(PlaylistResult {
            playlist_title,
            weather_condition,
            mood,
            tracks,
            city: city.to_string(),
        })
    }

    /// Recommendations for an arbitrary mood label, skipping the weather lookup
    pub fn recommend(&self, label: &str) -> Result<Vec<PlaylistTrack>> {
        let candidates = self
            .recommendations
            .fetch_recommendations(&RecommendationQuery::for_label(label))
            .inspect_err(|e| error!(mood = label, error = %e, "Error fetching recommendations"))?;
        Ok(to_playlist_tracks(candidates))
    }
}
