//! Spotify Web API wrapper.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{ClientCredentials, refresh_access_token};
pub use client::SpotifyApi;

use regex::Regex;
use std::sync::LazyLock;

static PLAYLIST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"open\.spotify\.com/playlist/([a-zA-Z0-9]+)").expect("valid playlist url regex")
});

/// Playlist id out of an `open.spotify.com/playlist/<id>` link.
pub fn playlist_id_from_url(url: &str) -> Option<&str> {
    PLAYLIST_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// An explicit id wins; otherwise the id parsed from `url`.
pub fn resolve_playlist_id<'a>(id: Option<&'a str>, url: Option<&'a str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .or_else(|| url.and_then(playlist_id_from_url))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_share_links() {
        assert_eq!(
            playlist_id_from_url("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc"),
            Some("37i9dQZF1DXcBWIGoYBM5M")
        );
        assert_eq!(playlist_id_from_url("https://open.spotify.com/album/xyz"), None);
    }

    #[test]
    fn explicit_id_takes_precedence() {
        assert_eq!(
            resolve_playlist_id(Some("given"), Some("https://open.spotify.com/playlist/fromurl")),
            Some("given".to_string())
        );
        assert_eq!(
            resolve_playlist_id(Some("  "), Some("https://open.spotify.com/playlist/fromurl")),
            Some("fromurl".to_string())
        );
        assert_eq!(resolve_playlist_id(None, Some("not a playlist")), None);
        assert_eq!(resolve_playlist_id(None, None), None);
    }
}
