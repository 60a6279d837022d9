//! Spotify Web API calls used by a run: search, playlist membership and
//! playlist additions. Every call is made once; a failure surfaces as
//! [`MixtapeError::Upstream`].
use super::types::{AddTracksBody, PlaylistTracksPage, SearchResponse, SnapshotResponse};
use async_trait::async_trait;
use mixtape_common::{MatchCandidate, MixtapeError, Result, TrackUri};
use mixtape_http::{Auth, HttpClient, RequestOpts};
use mixtape_pipeline::traits::{CatalogSearch, PlaylistStore};
use std::collections::HashSet;

pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1/";

/// Largest batch the add-items endpoint accepts.
pub const MAX_URIS_PER_ADD: usize = 100;

#[derive(Clone)]
pub struct SpotifyApi {
    http: HttpClient,
    access_token: String,
}

impl SpotifyApi {
    pub fn new(api_base: &str, access_token: String) -> Result<Self> {
        let http = HttpClient::new(api_base).map_err(|e| MixtapeError::upstream("spotify", e))?;
        Ok(Self { http, access_token })
    }

    fn opts(&self) -> RequestOpts<'_> {
        RequestOpts {
            auth: Some(Auth::Bearer(&self.access_token)),
            ..Default::default()
        }
    }

    /// Every track URI in the playlist, walking `next` until it runs out.
    pub async fn playlist_track_uris(&self, playlist_id: &str) -> Result<HashSet<TrackUri>> {
        let mut uris = HashSet::new();
        let mut url = format!("playlists/{playlist_id}/tracks");
        let mut pages = 0usize;

        loop {
            let page: PlaylistTracksPage = self
                .http
                .get_json(
                    &url,
                    RequestOpts {
                        allow_absolute: true,
                        ..self.opts()
                    },
                )
                .await
                .map_err(|e| {
                    MixtapeError::upstream("spotify", format!("Failed to fetch playlist tracks: {e}"))
                })?;
            pages += 1;

            uris.extend(
                page.items
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|item| item.track?.uri)
                    .map(TrackUri::new),
            );
            tracing::debug!(
                playlist_id,
                page = pages,
                collected = uris.len(),
                total = page.total.unwrap_or_default(),
                "spotify.playlist.page"
            );

            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(uris)
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<MatchCandidate>> {
        let resp: SearchResponse = self
            .http
            .get_json(
                "search",
                RequestOpts {
                    query: Some(vec![
                        ("q", query.into()),
                        ("type", "track".into()),
                        ("limit", limit.to_string().into()),
                    ]),
                    ..self.opts()
                },
            )
            .await
            .map_err(|e| MixtapeError::upstream("spotify search", e))?;

        Ok(resp
            .tracks
            .and_then(|t| t.items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.into_candidate())
            .collect())
    }

    /// Append `uris` in order, [`MAX_URIS_PER_ADD`] at a time.
    pub async fn add_tracks(&self, playlist_id: &str, uris: &[TrackUri]) -> Result<usize> {
        let path = format!("playlists/{playlist_id}/tracks");
        let mut added = 0;
        for chunk in uris.chunks(MAX_URIS_PER_ADD) {
            let resp: Option<SnapshotResponse> = self
                .http
                .post_json(&path, &AddTracksBody { uris: chunk }, self.opts())
                .await
                .map_err(|e| MixtapeError::upstream("spotify", format!("Failed to add tracks: {e}")))?;
            added += chunk.len();
            let snapshot = resp.and_then(|r| r.snapshot_id);
            tracing::debug!(
                playlist_id,
                chunk = chunk.len(),
                snapshot_id = snapshot.as_deref().unwrap_or("-"),
                "spotify.playlist.added"
            );
        }
        Ok(added)
    }
}

#[async_trait]
impl CatalogSearch for SpotifyApi {
    async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<MatchCandidate>> {
        self.search(query, limit).await
    }
}

#[async_trait]
impl PlaylistStore for SpotifyApi {
    async fn fetch_existing_membership(&self, playlist_id: &str) -> Result<HashSet<TrackUri>> {
        self.playlist_track_uris(playlist_id).await
    }

    async fn commit_additions(&self, playlist_id: &str, uris: &[TrackUri]) -> Result<usize> {
        self.add_tracks(playlist_id, uris).await
    }
}
