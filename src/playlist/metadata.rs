use super::{Mood, PlaylistTrack};
use serde::Serialize;

/// Label used for `weather_condition` when the provider sent no condition entry
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// The generated playlist returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResult {
    pub playlist_title: String,
    /// Raw provider label such as "Clear", not the derived mood
    pub weather_condition: String,
    pub mood: Mood,
    pub tracks: Vec<PlaylistTrack>, // catalog order
    pub city: String,
}
