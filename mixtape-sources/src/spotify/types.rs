use mixtape_common::{MatchCandidate, TrackUri};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Option<Vec<PlaylistItem>>,
    /// Absolute URL of the next page, `null` on the last one.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// Null for removed or local-only tracks.
    #[serde(default)]
    pub track: Option<TrackRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackRef {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<SearchTracks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTracks {
    #[serde(default)]
    pub items: Option<Vec<TrackObject>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    #[serde(default)]
    pub name: Option<String>,
}

impl TrackObject {
    /// Search hit as a match candidate. Hits without a URI cannot be added
    /// to a playlist and are dropped.
    pub fn into_candidate(self) -> Option<MatchCandidate> {
        Some(MatchCandidate {
            uri: TrackUri::new(self.uri?),
            name: self.name.unwrap_or_default(),
            artists: self
                .artists
                .into_iter()
                .map(|a| a.name.unwrap_or_default())
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AddTracksBody<'a> {
    pub uris: &'a [TrackUri],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default)]
    pub snapshot_id: Option<String>,
}
