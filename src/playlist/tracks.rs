use crate::models::TrackCandidate;
use serde::Serialize;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A track as it appears in the playlist response. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTrack {
    pub name: String,
    pub artist: String,
    pub spotify_url: String,
    pub album_name: String,
}

/// Reshape a catalog track, substituting defaults for anything missing
pub fn to_playlist_track(candidate: TrackCandidate) -> PlaylistTrack {
    let artist = candidate
        .artist_names
        .and_then(|names| names.into_iter().next())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    PlaylistTrack {
        name: candidate.name,
        artist,
        spotify_url: candidate.external_url.unwrap_or_default(),
        album_name: candidate
            .album_name
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
    }
}

/// Adapt candidates one-to-one, keeping catalog order
pub fn to_playlist_tracks(candidates: Vec<TrackCandidate>) -> Vec<PlaylistTrack> {
    candidates.into_iter().map(to_playlist_track).collect()
}
