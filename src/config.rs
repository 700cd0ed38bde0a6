use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub weather: WeatherConfig,
    pub spotify: SpotifyConfig,
    /// Applied to each upstream call independently
    pub timeout: Duration,
    pub bind_addr: String,
}

/// OpenWeatherMap settings
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Spotify Web API settings
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub base_url: String,
    pub access_token: String,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}

impl Config {
    /// Build the configuration from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("environment variable {key} is not set"))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = match lookup("JAMCAST_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("JAMCAST_HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            weather: WeatherConfig {
                base_url: optional("OPENWEATHERMAP_BASE_URL", DEFAULT_WEATHER_BASE_URL),
                api_key: required("OPENWEATHERMAP_API_KEY")?,
            },
            spotify: SpotifyConfig {
                base_url: optional("SPOTIFY_BASE_URL", DEFAULT_SPOTIFY_BASE_URL),
                access_token: required("SPOTIFY_ACCESS_TOKEN")?,
            },
            timeout: Duration::from_secs(timeout_secs),
            bind_addr: optional("JAMCAST_BIND_ADDR", DEFAULT_BIND_ADDR),
        })
    }
}
