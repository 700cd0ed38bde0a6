use super::{RecommendationSource, build_agent, call, parse};
use crate::config::SpotifyConfig;
use crate::error::{Result, Upstream};
use crate::models::{RecommendationsResponse, TrackCandidate};
use crate::playlist::Mood;
use std::time::Duration;
use tracing::{error, info};
use ureq::Agent;

pub const RECOMMENDATION_LIMIT: u32 = 20;
pub const TARGET_VALENCE: f64 = 0.7;

/// Parameters for one call to the recommendations endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub seed_genres: Vec<String>,
    pub limit: u32,
    pub target_valence: f64,
}

impl RecommendationQuery {
    pub fn for_mood(mood: Mood) -> Self {
        Self::for_label(mood.as_str())
    }

    /// Query for any mood label; labels outside the known moods get generic pop seeds
    pub fn for_label(label: &str) -> Self {
        RecommendationQuery {
            seed_genres: seed_genres(label).iter().map(|g| g.to_string()).collect(),
            limit: RECOMMENDATION_LIMIT,
            target_valence: TARGET_VALENCE,
        }
    }

    fn to_query_string(&self) -> String {
        format!(
            "seed_genres={}&limit={}&target_valence={}",
            self.seed_genres.join(","),
            self.limit,
            self.target_valence
        )
    }
}

/// Spotify genre seeds per mood label
pub fn seed_genres(label: &str) -> &'static [&'static str] {
    match label.to_lowercase().as_str() {
        "happy" => &["pop", "indie-pop", "summer"],
        "chill" => &["chill", "ambient", "indie"],
        "calm" => &["ambient", "classical", "instrumental"],
        "energetic" => &["rock", "electronic", "dance"],
        _ => &["pop", "indie"],
    }
}

/// Spotify Web API recommendations client authenticated with a bearer token
pub struct RecommendationClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl RecommendationClient {
    pub fn new(config: &SpotifyConfig, timeout: Duration) -> Self {
        RecommendationClient {
            agent: build_agent(timeout),
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn build_recommendations_url(&self, query: &RecommendationQuery) -> String {
        format!(
            "{}/recommendations?{}",
            self.base_url.trim_end_matches('/'),
            query.to_query_string()
        )
    }
}

impl RecommendationSource for RecommendationClient {
    fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<Vec<TrackCandidate>> {
        let seeds = query.seed_genres.join(",");
        info!(seeds = %seeds, "Fetching Spotify recommendations");

        let request = self
            .agent
            .get(&self.build_recommendations_url(query))
            .set("Authorization", &format!("Bearer {}", self.access_token));

        let response = call(Upstream::Spotify, request)
            .and_then(|body| parse::<RecommendationsResponse>(Upstream::Spotify, &body))
            .inspect_err(|e| error!(seeds = %seeds, error = %e, "Error fetching Spotify recommendations"))?;

        info!(seeds = %seeds, tracks = response.tracks.len(), "Successfully retrieved tracks");
        Ok(response.tracks.into_iter().map(TrackCandidate::from).collect())
    }
}
