//! Common types and utilities shared across mixtape crates.
//!
//! This crate defines the data model that flows through the link-harvesting
//! pipeline, observability helpers, and the shared error type. It stays
//! dependency-light so every other crate can depend on it.
//!
//! # Overview
//!
//! - [`CommentNode`] and [`Article`]: what the comment source hands us
//! - [`ExtractedLink`]: a direct track reference or a video reference
//! - [`MatchCandidate`] / [`ScoredCandidate`]: catalog search results
//! - [`ResolveOutcome`]: result of a video title lookup
//! - [`TrackUri`]: canonical catalog URI (`spotify:track:<id>`)
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`MixtapeError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use mixtape_common::TrackUri;
//!
//! let uri = TrackUri::from_track_id("4uLU6hMCjMI75M1A2tKUQC");
//! assert_eq!(uri.as_str(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod observability;

const TRACK_URI_PREFIX: &str = "spotify:track:";

/// A single comment with its replies, as returned by the comments endpoint.
///
/// The source hands back a forest: each article has several top-level
/// comments and each comment owns its replies in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(default, rename = "body_html")]
    pub body: Option<String>,
    #[serde(default)]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CommentNode>) -> Self {
        self.children = children;
        self
    }
}

/// A published article whose comment thread gets harvested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Everything else the source returned; carried along untouched.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Article {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: None,
            url: None,
            metadata: serde_json::Map::new(),
        }
    }
}

/// A link found in a comment body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtractedLink {
    /// Link that already names a catalog track id.
    DirectTrack(String),
    /// Link to a video that needs title resolution and a catalog search.
    Video(String),
}

/// Canonical catalog URI.
///
/// URIs arrive in canonical form from the membership and search endpoints,
/// so equality is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackUri(String);

impl TrackUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn from_track_id(id: &str) -> Self {
        Self(format!("{TRACK_URI_PREFIX}{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub uri: TrackUri,
    pub name: String,
    pub artists: Vec<String>,
}

/// A [`MatchCandidate`] with its heuristic score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: MatchCandidate,
    pub score: u32,
}

/// Outcome of looking up a video's display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Found(String),
    /// The host answered but had no usable title (unknown id, private video, ...).
    NotFound,
    /// Transport or decoding trouble; the reason is kept for logging.
    TransientFailure(String),
}

/// Error types used across mixtape.
#[derive(thiserror::Error, Debug)]
pub enum MixtapeError {
    /// An upstream API call failed.
    #[error("{service} request failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    /// Neither a playlist id nor a parsable playlist URL was supplied.
    #[error("PLAYLIST_ID missing. Set PLAYLIST_ID or PLAYLIST_URL in env.")]
    MissingPlaylist,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MixtapeError {
    pub fn upstream(service: &'static str, err: impl fmt::Display) -> Self {
        MixtapeError::Upstream {
            service,
            message: err.to_string(),
        }
    }
}

/// Convenient alias for results that use [`MixtapeError`].
pub type Result<T> = std::result::Result<T, MixtapeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_tree_deserializes_from_forem_shape() {
        let v = json!([
            {
                "body_html": "<p>root</p>",
                "children": [
                    { "body_html": null, "children": [] },
                    { "body_html": "<p>reply</p>" }
                ]
            }
        ]);
        let forest: Vec<CommentNode> = serde_json::from_value(v).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].body.as_deref(), Some("<p>root</p>"));
        assert_eq!(forest[0].children.len(), 2);
        assert!(forest[0].children[0].body.is_none());
        assert!(forest[0].children[1].children.is_empty());
    }

    #[test]
    fn article_keeps_unknown_fields() {
        let v = json!({ "id": 7, "title": "Music Monday", "tag_list": ["musicmonday"] });
        let article: Article = serde_json::from_value(v).unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.title.as_deref(), Some("Music Monday"));
        assert!(article.metadata.contains_key("tag_list"));
    }
}
