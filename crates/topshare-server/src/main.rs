//! topshare server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the income-share JSON API under
//! `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::{Router, routing::get};
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use topshare_store_sqlite::SqliteStore;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Interval between attempts to open the store at startup.
const STORE_RETRY_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(author, version, about = "Top-1% income share API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` merged
/// with `TOPSHARE_*` environment variables.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:       String,
  port:       u16,
  store_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TOPSHARE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open the SQLite store. Startup connectivity failures are retried at a
  // fixed interval instead of crashing; per-request faults are not.
  let store = open_store_with_retry(&store_path).await;

  let app = Router::new()
    .route("/", get(landing))
    .nest("/api", topshare_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn landing() -> &'static str {
  "Income Share of the Top 1% explorer"
}

/// Open the store, retrying indefinitely on failure.
async fn open_store_with_retry(path: &Path) -> SqliteStore {
  loop {
    match SqliteStore::open(path).await {
      Ok(store) => return store,
      Err(e) => {
        tracing::warn!(
          "failed to open store at {path:?}: {e}; retrying in {:?}",
          STORE_RETRY_INTERVAL
        );
        tokio::time::sleep(STORE_RETRY_INTERVAL).await;
      }
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
