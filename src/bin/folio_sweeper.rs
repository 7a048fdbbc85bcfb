//! Runs the deadline sweeper against a `PostgreSQL` task store.
//!
//! Usage:
//!
//! ```text
//! folio-sweeper [--database-url <url>] [--sweep-interval-minutes <n>] ...
//! ```
//!
//! Settings are layered from `FOLIO_*` environment variables, CLI flags, and
//! configuration files. Values written to the `settings` table override the
//! start-up layers and are re-read before every sweep. The process sweeps
//! once at start-up, then at each interval until it receives Ctrl-C.

use folio::config::{
    FolioSettings, SettingsBackedConfig, adapters::postgres::PostgresSettingRepository,
};
use folio::pg::build_pool;
use folio::task::adapters::postgres::PostgresTaskRepository;
use folio::task::services::{DeadlineSweeper, TokioSleeper};
use folio::telemetry;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the sweeper before its loop starts.
#[derive(Debug, Error)]
enum SweeperError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error("database_url is not configured; set FOLIO_DATABASE_URL or --database-url")]
    MissingDatabaseUrl,
    #[error("invalid engine configuration: {0}")]
    Config(#[from] folio::config::ConfigError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init()?;
    run().await.map_err(Into::into)
}

async fn run() -> Result<(), SweeperError> {
    let settings = FolioSettings::load_from_iter(std::env::args_os())
        .map_err(|err| SweeperError::Settings(err.to_string()))?;
    let base = settings.engine_config()?;
    let database_url = settings
        .database_url()
        .ok_or(SweeperError::MissingDatabaseUrl)?;
    let pool = build_pool(database_url)?;

    let config = Arc::new(SettingsBackedConfig::new(
        base,
        Arc::new(PostgresSettingRepository::new(pool.clone())),
    ));
    let sweeper = DeadlineSweeper::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        config,
        Arc::new(TokioSleeper),
        Arc::new(DefaultClock),
    );

    info!(
        overdue_hours = base.overdue_hours(),
        sweep_interval_minutes = base.sweep_interval_minutes(),
        "deadline sweeper starting"
    );
    let sweeps = sweeper
        .run_until(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!(%error, "failed to listen for shutdown signal; stopping");
            }
        })
        .await;
    info!(sweeps, "deadline sweeper stopped");
    Ok(())
}
