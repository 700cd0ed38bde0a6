use super::{WeatherSource, build_agent, call, parse};
use crate::config::WeatherConfig;
use crate::error::{Result, Upstream};
use crate::models::{WeatherResponse, WeatherSnapshot};
use std::time::Duration;
use tracing::{error, info};
use ureq::Agent;
use urlencoding::encode;

/// OpenWeatherMap current-weather client
pub struct WeatherClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig, timeout: Duration) -> Self {
        WeatherClient {
            agent: build_agent(timeout),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Current weather endpoint for a city, always in metric units
    fn build_weather_url(&self, city: &str) -> String {
        format!(
            "{}?q={}&appid={}&units=metric",
            self.base_url,
            encode(city),
            encode(&self.api_key)
        )
    }
}

impl WeatherSource for WeatherClient {
    fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        info!(city, "Fetching weather data");

        let request = self.agent.get(&self.build_weather_url(city));
        let snapshot = call(Upstream::Weather, request)
            .and_then(|body| parse::<WeatherResponse>(Upstream::Weather, &body))
            .map(|response| WeatherSnapshot::from_response(response, city))
            .inspect_err(|e| error!(city, error = %e, "Error fetching weather"))?;

        info!(
            city,
            condition = snapshot.condition_main().unwrap_or("none"),
            description = snapshot
                .condition
                .as_ref()
                .map(|c| c.description.as_str())
                .unwrap_or(""),
            temperature = snapshot.temperature_celsius,
            "Successfully retrieved weather"
        );
        Ok(snapshot)
    }
}
