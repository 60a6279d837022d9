//! Minimal wrapper around the public Forem article and comment endpoints.
//!
//! Both endpoints are unauthenticated. The comment endpoint rate limits
//! aggressively, so comment fetches retry a 429 exactly once after a fixed
//! pause; nothing else is retried.
use async_trait::async_trait;
use mixtape_common::{Article, CommentNode, MixtapeError, Result};
use mixtape_http::{HttpClient, HttpError, RequestOpts};
use mixtape_pipeline::traits::{ArticleSource, CommentSource};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://music.forem.com/";

/// Which articles make up the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFeed {
    pub username: String,
    pub tag: String,
}

impl Default for ArticleFeed {
    fn default() -> Self {
        Self {
            username: "musicfrorem".into(),
            tag: "musicmonday".into(),
        }
    }
}

#[derive(Clone)]
pub struct ForemApi {
    http: HttpClient,
    feed: ArticleFeed,
    rate_limit_delay: Duration,
}

impl ForemApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::new(base_url).map_err(|e| MixtapeError::upstream("forem", e))?;
        Ok(Self {
            http,
            feed: ArticleFeed::default(),
            rate_limit_delay: Duration::from_secs(2),
        })
    }

    pub fn with_feed(mut self, feed: ArticleFeed) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// The feed's articles, newest first, truncated to `limit`.
    pub async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>> {
        let articles: Option<Vec<Article>> = self
            .http
            .get_json(
                "api/articles",
                RequestOpts {
                    query: Some(vec![
                        ("username", self.feed.username.as_str().into()),
                        ("tag", self.feed.tag.as_str().into()),
                    ]),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| MixtapeError::upstream("forem articles", e))?;

        let mut articles = articles.unwrap_or_default();
        articles.truncate(limit);
        Ok(articles)
    }

    /// Raw comment forest for one article.
    pub async fn comments(&self, article_id: u64) -> std::result::Result<Vec<CommentNode>, HttpError> {
        let id = article_id.to_string();
        let forest: Option<Vec<CommentNode>> = self
            .http
            .get_json(
                "api/comments",
                RequestOpts {
                    query: Some(vec![("a_id", id.into())]),
                    retries: 1,
                    retry_delay: Some(self.rate_limit_delay),
                    ..Default::default()
                },
            )
            .await?;
        Ok(forest.unwrap_or_default())
    }
}

#[async_trait]
impl ArticleSource for ForemApi {
    async fn fetch_articles(&self, limit: usize) -> Result<Vec<Article>> {
        self.recent_articles(limit).await
    }
}

#[async_trait]
impl CommentSource for ForemApi {
    async fn fetch_comment_tree(&self, article_id: u64) -> Vec<CommentNode> {
        match self.comments(article_id).await {
            Ok(forest) => forest,
            Err(e) if e.is_rate_limited() => {
                tracing::warn!(article_id, error = %e, "comments still rate limited after retry");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(article_id, error = %e, "comments fetch failed");
                Vec::new()
            }
        }
    }
}
