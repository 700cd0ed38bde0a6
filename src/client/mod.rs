//! Blocking HTTP clients for the two upstream services.

pub mod spotify;
pub mod weather;

pub use spotify::{RecommendationClient, RecommendationQuery};
pub use weather::WeatherClient;

use crate::error::{PlaylistError, Result, Upstream, UpstreamFailure};
use crate::models::{TrackCandidate, WeatherSnapshot};
use serde::de::DeserializeOwned;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

/// Source of current weather for a city
#[cfg_attr(test, mockall::automock)]
pub trait WeatherSource: Send + Sync {
    fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot>;
}

/// Source of track recommendations
#[cfg_attr(test, mockall::automock)]
pub trait RecommendationSource: Send + Sync {
    fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<Vec<TrackCandidate>>;
}

/// Agent with one overall deadline per request
fn build_agent(timeout: Duration) -> Agent {
    AgentBuilder::new().timeout(timeout).build()
}

/// Send a prepared request and return the body of a 2xx response
fn call(service: Upstream, request: ureq::Request) -> Result<String> {
    match request.call() {
        Ok(response) => response
            .into_string()
            .map_err(|e| PlaylistError::upstream(service, classify_io(&e))),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(PlaylistError::upstream(
                service,
                UpstreamFailure::Status { status, body },
            ))
        }
        Err(ureq::Error::Transport(transport)) => {
            let timed_out = std::error::Error::source(&transport)
                .and_then(|source| source.downcast_ref::<std::io::Error>())
                .is_some_and(is_timeout);
            let failure = if timed_out {
                UpstreamFailure::Timeout
            } else {
                UpstreamFailure::Transport(transport.to_string())
            };
            Err(PlaylistError::upstream(service, failure))
        }
    }
}

fn parse<T: DeserializeOwned>(service: Upstream, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| PlaylistError::upstream(service, UpstreamFailure::Malformed(e.to_string())))
}

fn classify_io(error: &std::io::Error) -> UpstreamFailure {
    if is_timeout(error) {
        UpstreamFailure::Timeout
    } else {
        UpstreamFailure::Transport(error.to_string())
    }
}

fn is_timeout(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}
