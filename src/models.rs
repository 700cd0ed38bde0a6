use crate::error::{PlaylistError, Result};
use serde::Deserialize;

pub const CITY_MAX_CHARS: usize = 100;

/// Response structure for the OpenWeatherMap current weather call
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    /// Absent and `null` both mean "no condition entries"
    #[serde(default)]
    pub weather: Option<Vec<WeatherCondition>>,
    pub main: MainReadings,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64, // Celsius, requested with units=metric
}

/// Current weather for one city, reduced to what mood mapping needs
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// First entry of the provider's condition list, if it sent any
    pub condition: Option<WeatherCondition>,
    pub temperature_celsius: f64,
    pub city_name: String,
}

impl WeatherSnapshot {
    pub fn from_response(response: WeatherResponse, requested_city: &str) -> Self {
        WeatherSnapshot {
            condition: response.weather.unwrap_or_default().into_iter().next(),
            temperature_celsius: response.main.temp,
            city_name: response
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| requested_city.to_string()),
        }
    }

    /// Raw provider label such as "Clouds"
    pub fn condition_main(&self) -> Option<&str> {
        self.condition.as_ref().map(|c| c.main.as_str())
    }
}

/// Response structure for the Spotify recommendations call
#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub artists: Option<Vec<SpotifyArtist>>,
    pub album: Option<SpotifyAlbum>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// A recommended track as the catalog described it; any descriptive field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    pub artist_names: Option<Vec<String>>,
    pub album_name: Option<String>,
    pub external_url: Option<String>,
}

impl From<SpotifyTrack> for TrackCandidate {
    fn from(track: SpotifyTrack) -> Self {
        TrackCandidate {
            id: track.id,
            name: track.name,
            artist_names: track
                .artists
                .map(|artists| artists.into_iter().map(|a| a.name).collect()),
            album_name: track.album.and_then(|album| album.name),
            external_url: track.external_urls.and_then(|urls| urls.spotify),
        }
    }
}

/// Request body for `POST /api/v1/playlist`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistRequest {
    #[serde(default)]
    pub city: Option<String>,
}

impl PlaylistRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }

    /// Return the city if it is present, not blank and at most 100 characters
    pub fn validate(&self) -> Result<&str> {
        let city = match self.city.as_deref() {
            Some(city) if !city.trim().is_empty() => city,
            _ => return Err(PlaylistError::field("city", "City name is required")),
        };
        if city.chars().count() > CITY_MAX_CHARS {
            return Err(PlaylistError::field(
                "city",
                "City name must be between 1 and 100 characters",
            ));
        }
        Ok(city)
    }
}
