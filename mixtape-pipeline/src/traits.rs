use async_trait::async_trait;
use mixtape_common::{Article, CommentNode, MatchCandidate, ResolveOutcome, Result, TrackUri};
use std::collections::HashSet;

/// Where the batch of articles comes from.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Most recent articles, newest first, at most `limit`.
    async fn fetch_articles(&self, limit: usize) -> Result<Vec<Article>>;
}

/// Comment threads for an article.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// The article's comment forest. Failures are logged and come back as an
    /// empty forest so one bad article never stops the batch.
    async fn fetch_comment_tree(&self, article_id: u64) -> Vec<CommentNode>;
}

/// Video id to display title.
#[async_trait]
pub trait TitleResolver: Send + Sync {
    async fn resolve_title(&self, video_id: &str) -> ResolveOutcome;
}

/// Catalog track search.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Up to `limit` track results for a free-text query, in catalog ranking order.
    async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<MatchCandidate>>;
}

/// The destination playlist.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Every track URI currently in the playlist. Implementations must walk all
    /// pages before returning; a partial set is an error, never a result.
    async fn fetch_existing_membership(&self, playlist_id: &str) -> Result<HashSet<TrackUri>>;

    /// Append `uris` in order. Returns how many were added.
    async fn commit_additions(&self, playlist_id: &str, uris: &[TrackUri]) -> Result<usize>;
}
