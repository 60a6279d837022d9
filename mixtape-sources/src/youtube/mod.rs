//! Video titles through YouTube's public oEmbed endpoint. No credentials needed.

use async_trait::async_trait;
use mixtape_common::{MixtapeError, ResolveOutcome, Result};
use mixtape_http::{HttpClient, HttpError, RequestOpts, StatusCode};
use mixtape_pipeline::traits::TitleResolver;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com/";

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Clone)]
pub struct OEmbedApi {
    http: HttpClient,
}

impl OEmbedApi {
    pub fn new() -> Result<Self> {
        Self::with_base(DEFAULT_BASE_URL)
    }

    pub fn with_base(base_url: &str) -> Result<Self> {
        let http = HttpClient::new(base_url).map_err(|e| MixtapeError::upstream("youtube", e))?;
        Ok(Self { http })
    }

    fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }
}

fn classify(err: &HttpError) -> ResolveOutcome {
    match err.status() {
        Some(status) if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
            ResolveOutcome::TransientFailure(err.to_string())
        }
        Some(_) => ResolveOutcome::NotFound,
        None => ResolveOutcome::TransientFailure(err.to_string()),
    }
}

#[async_trait]
impl TitleResolver for OEmbedApi {
    async fn resolve_title(&self, video_id: &str) -> ResolveOutcome {
        let got: std::result::Result<Option<OEmbedResponse>, HttpError> = self
            .http
            .get_json(
                "oembed",
                RequestOpts {
                    query: Some(vec![
                        ("url", Self::watch_url(video_id).into()),
                        ("format", "json".into()),
                    ]),
                    ..Default::default()
                },
            )
            .await;

        match got {
            Ok(Some(OEmbedResponse {
                title: Some(title),
            })) if !title.trim().is_empty() => ResolveOutcome::Found(title),
            Ok(_) => {
                tracing::warn!(video_id, "oEmbed response carried no title");
                ResolveOutcome::NotFound
            }
            Err(e) => {
                let outcome = classify(&e);
                tracing::warn!(video_id, error = %e, "Failed to fetch YouTube title");
                outcome
            }
        }
    }
}
