use clap::Parser;
use clap::builder::BoolishValueParser;
use mixtape_config::MixtapeConfig;
use std::path::PathBuf;

/// Harvest music links from Music Monday comment threads into a Spotify playlist.
#[derive(Debug, Parser)]
#[command(name = "mixtape", version)]
pub struct Cli {
    /// YAML config file, merged over the defaults and the per-user file.
    #[arg(long, env = "MIXTAPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report what would be added without modifying the playlist.
    #[arg(long, env = "DRY_RUN", value_parser = BoolishValueParser::new())]
    pub dry_run: bool,

    /// Also report matches that are already in the playlist.
    #[arg(long, env = "SHOW_ALL_MATCHES", value_parser = BoolishValueParser::new())]
    pub show_all_matches: bool,

    #[arg(long, env = "PLAYLIST_ID")]
    pub playlist_id: Option<String>,

    /// Share link in the form `https://open.spotify.com/playlist/<id>`.
    #[arg(long, env = "PLAYLIST_URL")]
    pub playlist_url: Option<String>,

    /// How many recent articles to harvest.
    #[arg(long)]
    pub article_limit: Option<usize>,
}

impl Cli {
    /// Flags and their environment variables win over file values.
    pub fn apply(&self, cfg: &mut MixtapeConfig) {
        cfg.run.dry_run |= self.dry_run;
        cfg.run.show_all_matches |= self.show_all_matches;
        if let Some(id) = &self.playlist_id {
            cfg.playlist.id = Some(id.clone());
        }
        if let Some(url) = &self.playlist_url {
            cfg.playlist.url = Some(url.clone());
        }
        if let Some(limit) = self.article_limit {
            cfg.forem.article_limit = limit;
        }
    }
}
