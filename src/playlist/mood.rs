use super::utils::Capitalize;
use crate::models::WeatherSnapshot;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Coarse listening mood derived from the weather
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Chill,
    Calm,
    Energetic,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Chill => "chill",
            Mood::Calm => "calm",
            Mood::Energetic => "energetic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a weather condition resolves to a mood
#[derive(Debug, Clone, Copy)]
enum MoodRule {
    Always(Mood),
    /// `warm` strictly above `threshold`, `cool` otherwise
    WarmAbove { threshold: f64, warm: Mood, cool: Mood },
}

impl MoodRule {
    fn apply(self, temperature: f64) -> Mood {
        match self {
            MoodRule::Always(mood) => mood,
            MoodRule::WarmAbove {
                threshold,
                warm,
                cool,
            } => {
                if temperature > threshold {
                    warm
                } else {
                    cool
                }
            }
        }
    }
}

/// OpenWeatherMap "main" condition groups, matched case-insensitively
const CONDITION_TABLE: &[(&[&str], MoodRule)] = &[
    (&["rain", "drizzle", "thunderstorm"], MoodRule::Always(Mood::Chill)),
    (&["clear"], MoodRule::Always(Mood::Happy)),
    (&["snow"], MoodRule::Always(Mood::Calm)),
    (
        &["clouds"],
        MoodRule::WarmAbove {
            threshold: 20.0,
            warm: Mood::Happy,
            cool: Mood::Chill,
        },
    ),
    (&["mist", "fog", "haze"], MoodRule::Always(Mood::Calm)),
    (&["smoke", "dust", "sand", "ash"], MoodRule::Always(Mood::Chill)),
    (&["squall", "tornado"], MoodRule::Always(Mood::Energetic)),
];

// Fallback thresholds for conditions missing from the table
const HOT_ABOVE: f64 = 25.0;
const COLD_BELOW: f64 = 10.0;

/// Map a weather snapshot to a mood. A snapshot without any condition entry maps to `happy`.
pub fn map_to_mood(snapshot: &WeatherSnapshot) -> Mood {
    let Some(condition) = snapshot.condition_main() else {
        warn!(
            city = %snapshot.city_name,
            "No weather data available, defaulting to 'happy' mood"
        );
        return Mood::default();
    };

    let mood = mood_for(condition, snapshot.temperature_celsius);
    debug!(
        condition,
        temperature = snapshot.temperature_celsius,
        %mood,
        "Mapped weather to mood"
    );
    mood
}

/// Table lookup for one condition label and temperature in Celsius
pub fn mood_for(condition: &str, temperature: f64) -> Mood {
    CONDITION_TABLE
        .iter()
        .find(|(labels, _)| labels.iter().any(|label| label.eq_ignore_ascii_case(condition)))
        .map(|(_, rule)| rule.apply(temperature))
        .unwrap_or_else(|| fallback_mood(temperature))
}

fn fallback_mood(temperature: f64) -> Mood {
    if temperature > HOT_ABOVE {
        Mood::Happy
    } else if temperature < COLD_BELOW {
        Mood::Chill
    } else {
        Mood::Calm
    }
}

/// "<Mood> Vibes in <City>", each part capitalized on its own
pub fn title_for(mood: Mood, city: &str) -> String {
    format!("{} Vibes in {}", mood.as_str().capitalize(), city.capitalize())
}
