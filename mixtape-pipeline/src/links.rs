//! Track and video link extraction from comment HTML.

use mixtape_common::ExtractedLink;
use regex::Regex;

/// `open.spotify.com/track/<id>` and `open.spotify.com/embed/track/<id>`.
pub const DIRECT_TRACK_PATTERN: &str =
    r"https?://open\.spotify\.com/(?:track|embed/track)/([a-zA-Z0-9]+)";

/// `youtube.com/watch?v=<id>`, `youtube.com/embed/<id>` and `youtu.be/<id>`.
pub const VIDEO_PATTERN: &str =
    r"https?://(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([A-Za-z0-9_-]+)";

/// Precompiled link patterns. Build once and share.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    direct_track: Regex,
    video: Regex,
}

impl LinkExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_patterns(DIRECT_TRACK_PATTERN, VIDEO_PATTERN)
    }

    /// Custom patterns; each must capture the id in group 1.
    pub fn with_patterns(direct_track: &str, video: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            direct_track: Regex::new(direct_track)?,
            video: Regex::new(video)?,
        })
    }

    /// Catalog track ids, in order of appearance, duplicates kept.
    pub fn extract_direct_tracks<'h>(&self, html: &'h str) -> Vec<&'h str> {
        capture_ids(&self.direct_track, html)
    }

    /// Video ids, in order of appearance, duplicates kept.
    pub fn extract_video_links<'h>(&self, html: &'h str) -> Vec<&'h str> {
        capture_ids(&self.video, html)
    }

    /// All direct tracks followed by all videos.
    pub fn extract(&self, html: &str) -> Vec<ExtractedLink> {
        let tracks = self
            .extract_direct_tracks(html)
            .into_iter()
            .map(|id| ExtractedLink::DirectTrack(id.to_string()));
        let videos = self
            .extract_video_links(html)
            .into_iter()
            .map(|id| ExtractedLink::Video(id.to_string()));
        tracks.chain(videos).collect()
    }
}

fn capture_ids<'h>(re: &Regex, html: &'h str) -> Vec<&'h str> {
    re.captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
