use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::Cli;
use mixtape_common::observability::{LogConfig, LogFormat, init_logging};
use mixtape_config::{MixtapeConfig, MixtapeConfigLoader};
use wiring::build_and_run;
mod cli;
mod wiring;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (flags and env win)
    let mut loader = MixtapeConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let mut cfg: MixtapeConfig = loader.load().context("loading configuration")?;
    cli.apply(&mut cfg);

    // 2) Logging from the merged config
    let log_path = init_logging(log_config(&cfg)?)?;
    tracing::debug!(log_path = %log_path.display(), "logging initialised");

    // 3) One batch run
    if let Err(e) = build_and_run(cfg).await {
        tracing::error!(error = ?e, "mixtape run failed");
        return Err(e);
    }
    Ok(())
}

fn log_config(cfg: &MixtapeConfig) -> Result<LogConfig> {
    let format = match cfg.log.format.as_deref() {
        Some(raw) => raw.parse::<LogFormat>().map_err(|e| anyhow!(e))?,
        None => LogFormat::default(),
    };
    Ok(LogConfig {
        log_dir: cfg.log.dir.clone(),
        emit_stderr: cfg.log.stderr,
        format,
        ..LogConfig::default()
    })
}
