//! One end-to-end run: membership, articles, harvest, commit.

use crate::orchestrator::{Pipeline, PipelineReport};
use crate::traits::{ArticleSource, PlaylistStore};
use mixtape_common::Result;

#[derive(Debug, Clone)]
pub struct BatchRequest<'a> {
    pub playlist_id: &'a str,
    pub article_limit: usize,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub existing: usize,
    pub articles: usize,
    pub report: PipelineReport,
    /// Tracks actually appended. Always zero on a dry run.
    pub added: usize,
}

/// Run the whole batch once.
///
/// Membership and article listing failures abort before anything is
/// written. The playlist is only touched when there is something new and
/// `dry_run` is off.
pub async fn run_batch(
    articles: &dyn ArticleSource,
    playlist: &dyn PlaylistStore,
    pipeline: &Pipeline<'_>,
    request: &BatchRequest<'_>,
) -> Result<BatchSummary> {
    let existing = playlist.fetch_existing_membership(request.playlist_id).await?;
    tracing::info!(count = existing.len(), "Existing tracks in playlist");

    let batch = articles.fetch_articles(request.article_limit).await?;
    tracing::info!(count = batch.len(), "Fetched articles");

    let report = pipeline.run(&batch, &existing).await;
    tracing::info!(count = report.uris.len(), "Collected new track URIs");

    let added = if report.uris.is_empty() {
        tracing::info!("No new tracks to add");
        0
    } else if request.dry_run {
        tracing::info!(count = report.uris.len(), "DRY_RUN: would add tracks");
        for uri in &report.uris {
            tracing::info!(%uri, "DRY_RUN: would add");
        }
        0
    } else {
        let added = playlist
            .commit_additions(request.playlist_id, &report.uris)
            .await?;
        tracing::info!(count = added, playlist_id = request.playlist_id, "Added tracks to playlist");
        added
    };

    Ok(BatchSummary {
        existing: existing.len(),
        articles: batch.len(),
        report,
        added,
    })
}
