//! In-memory collaborators for unit tests.

use crate::traits::{ArticleSource, CatalogSearch, CommentSource, PlaylistStore, TitleResolver};
use async_trait::async_trait;
use mixtape_common::{
    Article, CommentNode, MatchCandidate, MixtapeError, ResolveOutcome, Result, TrackUri,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn candidate(uri: &str, name: &str, artists: &[&str]) -> MatchCandidate {
    MatchCandidate {
        uri: TrackUri::new(uri),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

#[derive(Default)]
pub(crate) struct FakeComments {
    forests: HashMap<u64, Vec<CommentNode>>,
    requested: Mutex<Vec<u64>>,
}

impl FakeComments {
    pub(crate) fn with(mut self, article_id: u64, forest: Vec<CommentNode>) -> Self {
        self.forests.insert(article_id, forest);
        self
    }

    pub(crate) fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentSource for FakeComments {
    async fn fetch_comment_tree(&self, article_id: u64) -> Vec<CommentNode> {
        self.requested.lock().unwrap().push(article_id);
        self.forests.get(&article_id).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub(crate) struct FakeResolver {
    outcomes: HashMap<String, ResolveOutcome>,
}

impl FakeResolver {
    pub(crate) fn found(mut self, video_id: &str, title: &str) -> Self {
        self.outcomes
            .insert(video_id.to_string(), ResolveOutcome::Found(title.to_string()));
        self
    }

    pub(crate) fn not_found(mut self, video_id: &str) -> Self {
        self.outcomes
            .insert(video_id.to_string(), ResolveOutcome::NotFound);
        self
    }

    pub(crate) fn failing(mut self, video_id: &str) -> Self {
        self.outcomes.insert(
            video_id.to_string(),
            ResolveOutcome::TransientFailure("connection reset".into()),
        );
        self
    }
}

#[async_trait]
impl TitleResolver for FakeResolver {
    async fn resolve_title(&self, video_id: &str) -> ResolveOutcome {
        self.outcomes
            .get(video_id)
            .cloned()
            .unwrap_or(ResolveOutcome::NotFound)
    }
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    results: HashMap<String, Vec<MatchCandidate>>,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub(crate) fn with(mut self, query: &str, results: Vec<MatchCandidate>) -> Self {
        self.results.insert(query.to_string(), results);
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search_tracks(&self, query: &str, _limit: usize) -> Result<Vec<MatchCandidate>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

pub(crate) struct FakeArticles {
    pub(crate) articles: Vec<Article>,
    pub(crate) fail: bool,
}

#[async_trait]
impl ArticleSource for FakeArticles {
    async fn fetch_articles(&self, limit: usize) -> Result<Vec<Article>> {
        if self.fail {
            return Err(MixtapeError::upstream("forem", "503 Service Unavailable"));
        }
        Ok(self.articles.iter().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct FakePlaylist {
    pub(crate) existing: HashSet<TrackUri>,
    pub(crate) fail_membership: bool,
    pub(crate) committed: Mutex<Vec<Vec<TrackUri>>>,
}

impl FakePlaylist {
    pub(crate) fn commits(&self) -> Vec<Vec<TrackUri>> {
        self.committed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistStore for FakePlaylist {
    async fn fetch_existing_membership(&self, _playlist_id: &str) -> Result<HashSet<TrackUri>> {
        if self.fail_membership {
            return Err(MixtapeError::upstream("spotify", "page 2 failed"));
        }
        Ok(self.existing.clone())
    }

    async fn commit_additions(&self, _playlist_id: &str, uris: &[TrackUri]) -> Result<usize> {
        self.committed.lock().unwrap().push(uris.to_vec());
        Ok(uris.len())
    }
}
