//! `till` — sales-transaction browsing service.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! configured storage backend, and either serves the JSON API or runs the
//! guarded CSV bulk importer.
//!
//! # Usage
//!
//! ```
//! till serve
//! till import --csv data/sales_data.csv
//! till --config /etc/till.toml import --csv sales.csv --force
//! ```

mod import;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use till_core::store::TransactionStore;
use till_store_postgres::PostgresStore;
use till_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "till", about = "Sales transaction browsing service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API.
  Serve,
  /// Bulk-load a CSV export into the store.
  Import {
    /// Path to the CSV file.
    #[arg(long)]
    csv: PathBuf,

    /// Truncate existing rows instead of refusing to double-import.
    #[arg(long)]
    force: bool,
  },
}

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Backend {
  #[default]
  Sqlite,
  Postgres,
}

/// Runtime configuration, deserialised from `config.toml` with `TILL_*`
/// environment overrides.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:         String,
  #[serde(default = "default_port")]
  port:         u16,
  #[serde(default)]
  backend:      Backend,
  /// SQLite database file (backend = "sqlite").
  #[serde(default = "default_store_path")]
  store_path:   PathBuf,
  /// PostgreSQL connection string (backend = "postgres").
  database_url: Option<String>,
}

fn default_host() -> String {
  "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
  5000
}

fn default_store_path() -> PathBuf {
  PathBuf::from("data/sales.db")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

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

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("TILL"))
    .build()
    .context("failed to read config")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Store init failure is fatal: log it via the error chain and exit. Once a
  // store is open, later backend failures surface through /health instead.
  match server_cfg.backend {
    Backend::Sqlite => {
      let store = SqliteStore::open(&server_cfg.store_path)
        .await
        .with_context(|| {
          format!("failed to open store at {}", server_cfg.store_path.display())
        })?;
      dispatch(cli.command, store, &server_cfg).await
    }
    Backend::Postgres => {
      let url = server_cfg
        .database_url
        .as_deref()
        .context("backend = \"postgres\" requires database_url")?;
      let store = PostgresStore::connect(url)
        .await
        .context("failed to connect to postgres")?;
      dispatch(cli.command, store, &server_cfg).await
    }
  }
}

async fn dispatch<S>(command: Command, store: S, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: TransactionStore + Send + Sync + 'static,
{
  let store = Arc::new(store);
  match command {
    Command::Serve => serve(store, cfg).await,
    Command::Import { csv, force } => import::run(store.as_ref(), &csv, force).await,
  }
}

async fn serve<S>(store: Arc<S>, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: TransactionStore + Send + Sync + 'static,
{
  let app = Router::new()
    .nest("/api", till_api::api_router(store))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", cfg.host, cfg.port);
  tracing::info!("listening on http://{address}");

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
