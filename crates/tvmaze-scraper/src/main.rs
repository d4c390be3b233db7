//! tvmaze-scraper binary.
//!
//! Reads `scraper.toml` (or the path given with `--config`) plus `TVMAZE_*`
//! environment variables, opens the SQLite store, and ingests the upstream
//! catalog until interrupted with ctrl-c.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tvmaze_scraper::{HttpCatalog, IngestLoop, LoopExit, Pipeline, ScraperConfig};
use tvmaze_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Ingest the TVmaze show catalog into SQLite")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "scraper.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ScraperConfig::load(&cli.config)
    .context("failed to load scraper configuration")?;

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let catalog = HttpCatalog::new(&cfg.base_url, cfg.request_timeout())
    .context("failed to build HTTP client")?;

  let pipeline = Pipeline::new(
    catalog,
    Arc::new(store),
    cfg.retry_policy(),
    cfg.rate_limiter(),
  );
  let ingest = IngestLoop::new(pipeline, cfg.shows_per_page, cfg.exhausted_policy());

  let cancel = CancellationToken::new();
  let on_signal = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::info!("shutdown requested");
      on_signal.cancel();
    }
  });

  tracing::info!(base_url = %cfg.base_url, "scraper starting");
  match ingest.run(&cancel).await.context("ingestion failed")? {
    LoopExit::Cancelled { next_page } => {
      tracing::info!(next_page, "scraper stopped");
    }
    LoopExit::Exhausted { page } => {
      tracing::info!(page, "upstream catalog fully ingested");
    }
  }

  Ok(())
}
