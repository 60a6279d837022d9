use anyhow::{Context, Result};
use mixtape_common::MixtapeError;
use mixtape_config::MixtapeConfig;
use mixtape_pipeline::{
    BatchRequest, LinkExtractor, MatchSettings, Pipeline, PipelineSettings, run_batch,
};
use mixtape_sources::forem::ArticleFeed;
use mixtape_sources::spotify::{ClientCredentials, refresh_access_token, resolve_playlist_id};
use mixtape_sources::{ForemApi, OEmbedApi, SpotifyApi};
use std::time::Duration;

/// Build every collaborator from config and run the batch once.
pub async fn build_and_run(cfg: MixtapeConfig) -> Result<()> {
    let playlist_id = resolve_playlist_id(cfg.playlist.id.as_deref(), cfg.playlist.url.as_deref())
        .ok_or(MixtapeError::MissingPlaylist)?;

    let access_token = refresh_access_token(
        &cfg.spotify.accounts_base,
        ClientCredentials {
            client_id: &cfg.spotify.client_id,
            client_secret: &cfg.spotify.client_secret,
            refresh_token: &cfg.spotify.refresh_token,
        },
    )
    .await
    .context("refreshing Spotify access token")?;

    let spotify = SpotifyApi::new(&cfg.spotify.api_base, access_token)?;
    let forem = ForemApi::new(&cfg.forem.base_url)?
        .with_feed(ArticleFeed {
            username: cfg.forem.username.clone(),
            tag: cfg.forem.tag.clone(),
        })
        .with_rate_limit_delay(Duration::from_secs(cfg.forem.rate_limit_delay_secs));
    let youtube = OEmbedApi::new()?;
    let extractor = LinkExtractor::new().context("compiling link patterns")?;

    let settings = PipelineSettings {
        matching: MatchSettings::default(),
        show_all_matches: cfg.run.show_all_matches,
    };
    let pipeline = Pipeline::new(&forem, &youtube, &spotify, &extractor, settings);

    let summary = run_batch(
        &forem,
        &spotify,
        &pipeline,
        &BatchRequest {
            playlist_id: &playlist_id,
            article_limit: cfg.forem.article_limit,
            dry_run: cfg.run.dry_run,
        },
    )
    .await
    .with_context(|| format!("harvesting into playlist {playlist_id}"))?;

    tracing::info!(
        existing = summary.existing,
        articles = summary.articles,
        collected = summary.report.uris.len(),
        added = summary.added,
        dry_run = cfg.run.dry_run,
        "mixtape run complete"
    );
    Ok(())
}
