//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use folio::config::{
    EngineConfig, SettingsBackedConfig, adapters::postgres::PostgresSettingRepository,
};
use folio::identity::{adapters::postgres::PostgresIdentityRepository, services::IdentityService};
use folio::ledger::{adapters::postgres::PostgresTransactionRepository, services::LedgerService};
use folio::pg::{FolioPgPool, build_pool};
use folio::task::{
    adapters::{
        memory::InMemoryReleaseQueue,
        postgres::{PostgresTaskRepository, PostgresWorkRepository},
    },
    services::{DeadlineSweeper, ReviewService, TaskLifecycleService, WorkTaskRegistry},
};
use folio::test_support::{ImmediateSleeper, MutableClock};
use tokio::sync::{Mutex, MutexGuard};

/// Boxed error type for fallible setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the disposable test database.
pub const DATABASE_URL_ENV: &str = "FOLIO_TEST_DATABASE_URL";

const DROP_SQL: [&str; 3] = [
    include_str!("../../migrations/2026-10-01-000002_create_settings/down.sql"),
    include_str!("../../migrations/2026-10-01-000001_create_identities_and_ledger/down.sql"),
    include_str!("../../migrations/2026-10-01-000000_create_catalogue/down.sql"),
];

const CREATE_SQL: [&str; 3] = [
    include_str!("../../migrations/2026-10-01-000000_create_catalogue/up.sql"),
    include_str!("../../migrations/2026-10-01-000001_create_identities_and_ledger/up.sql"),
    include_str!("../../migrations/2026-10-01-000002_create_settings/up.sql"),
];

static SCHEMA_LOCK: Mutex<()> = Mutex::const_new(());

/// Serializes tests that share the database.
pub async fn schema_guard() -> MutexGuard<'static, ()> {
    SCHEMA_LOCK.lock().await
}

/// Returns the configured test database URL, if any.
#[must_use]
pub fn database_url() -> Option<String> {
    std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Drops and recreates the schema, then returns a pool over it.
///
/// # Errors
///
/// Returns an error when the database is unreachable or a migration fails.
pub fn fresh_pool(url: &str) -> Result<FolioPgPool, BoxError> {
    let mut connection = PgConnection::establish(url)?;
    for sql in DROP_SQL.iter().chain(CREATE_SQL.iter()) {
        connection.batch_execute(sql)?;
    }
    Ok(build_pool(url)?)
}

/// Services wired over `PostgreSQL` adapters.
pub struct PgEngine {
    pub clock: Arc<MutableClock>,
    pub settings: Arc<PostgresSettingRepository>,
    pub identities: IdentityService<PostgresIdentityRepository, MutableClock>,
    pub registry: WorkTaskRegistry<PostgresTaskRepository, PostgresWorkRepository, MutableClock>,
    pub lifecycle: TaskLifecycleService<PostgresTaskRepository, MutableClock>,
    pub review: ReviewService<
        PostgresTaskRepository,
        PostgresWorkRepository,
        PostgresTransactionRepository,
        PostgresIdentityRepository,
        MutableClock,
    >,
    pub ledger:
        LedgerService<PostgresTransactionRepository, PostgresIdentityRepository, MutableClock>,
    pub sweeper: DeadlineSweeper<PostgresTaskRepository, MutableClock>,
}

impl PgEngine {
    /// Wires every service over `pool`.
    #[must_use]
    pub fn new(pool: &FolioPgPool) -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 7, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = Arc::new(MutableClock::new(start));
        let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
        let works = Arc::new(PostgresWorkRepository::new(pool.clone()));
        let identity_store = Arc::new(PostgresIdentityRepository::new(pool.clone()));
        let transactions = Arc::new(PostgresTransactionRepository::new(pool.clone()));
        let settings = Arc::new(PostgresSettingRepository::new(pool.clone()));
        let config = Arc::new(SettingsBackedConfig::new(
            EngineConfig::default(),
            Arc::clone(&settings),
        ));
        let build_ledger = || {
            LedgerService::new(
                Arc::clone(&transactions),
                Arc::clone(&identity_store),
                config.clone(),
                Arc::clone(&clock),
            )
        };
        let review_ledger = build_ledger();
        let ledger = build_ledger();

        Self {
            identities: IdentityService::new(Arc::clone(&identity_store), Arc::clone(&clock)),
            registry: WorkTaskRegistry::new(
                Arc::clone(&tasks),
                Arc::clone(&works),
                Arc::clone(&clock),
            ),
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&tasks),
                config.clone(),
                Arc::clone(&clock),
            ),
            review: ReviewService::new(
                Arc::clone(&tasks),
                works,
                review_ledger,
                Arc::new(InMemoryReleaseQueue::new()),
                config.clone(),
                Arc::clone(&clock),
            ),
            sweeper: DeadlineSweeper::new(
                tasks,
                config,
                Arc::new(ImmediateSleeper),
                Arc::clone(&clock),
            ),
            ledger,
            clock,
            settings,
        }
    }
}
