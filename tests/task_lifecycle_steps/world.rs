//! Shared world state for chapter task lifecycle scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use folio::config::{
    EngineConfig, SettingsBackedConfig, adapters::memory::InMemorySettingRepository,
};
use folio::error::ErrorKind;
use folio::identity::{
    adapters::memory::InMemoryIdentityRepository, domain::Caller, services::IdentityService,
};
use folio::ledger::{adapters::memory::InMemoryTransactionRepository, services::LedgerService};
use folio::task::{
    adapters::memory::{InMemoryReleaseQueue, InMemoryTaskRepository, InMemoryWorkRepository},
    domain::{TaskId, WorkId},
    services::{DeadlineSweeper, ReviewService, TaskLifecycleService, WorkTaskRegistry},
};
use folio::test_support::{ImmediateSleeper, MutableClock};
use rstest::fixture;

/// Review service type used by the BDD world.
pub type TestReviewService = ReviewService<
    InMemoryTaskRepository,
    InMemoryWorkRepository,
    InMemoryTransactionRepository,
    InMemoryIdentityRepository,
    MutableClock,
>;

/// Scenario world for chapter lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub clock: Arc<MutableClock>,
    pub settings: Arc<InMemorySettingRepository>,
    pub identities: IdentityService<InMemoryIdentityRepository, MutableClock>,
    pub registry: WorkTaskRegistry<InMemoryTaskRepository, InMemoryWorkRepository, MutableClock>,
    pub lifecycle: TaskLifecycleService<InMemoryTaskRepository, MutableClock>,
    pub review: TestReviewService,
    pub sweeper: DeadlineSweeper<InMemoryTaskRepository, MutableClock>,
    pub callers: HashMap<String, Caller>,
    pub works: HashMap<String, WorkId>,
    pub current_task: Option<TaskId>,
    pub last_error: Option<ErrorKind>,
}

impl LifecycleWorld {
    /// Creates a world with default configuration and no registered actors.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 2, 2, 10, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = Arc::new(MutableClock::new(start));
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let works = Arc::new(InMemoryWorkRepository::new());
        let identities = Arc::new(InMemoryIdentityRepository::new());
        let settings = Arc::new(InMemorySettingRepository::new());
        let config = Arc::new(SettingsBackedConfig::new(
            EngineConfig::default(),
            Arc::clone(&settings),
        ));
        let ledger = LedgerService::new(
            Arc::new(InMemoryTransactionRepository::new()),
            Arc::clone(&identities),
            config.clone(),
            Arc::clone(&clock),
        );

        Self {
            identities: IdentityService::new(identities, Arc::clone(&clock)),
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
                ledger,
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
            clock,
            settings,
            callers: HashMap::new(),
            works: HashMap::new(),
            current_task: None,
            last_error: None,
        }
    }

    /// Returns the caller registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when no actor was registered under `key`.
    pub fn caller(&self, key: &str) -> Result<Caller, eyre::Report> {
        self.callers
            .get(key)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no registered actor {key} in scenario world"))
    }

    /// Returns the task the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no chapter was created yet.
    pub fn task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("missing chapter in scenario world"))
    }

    /// Records the outcome of a `When` step.
    pub fn record<T, E>(&mut self, result: Result<T, E>, kind: impl FnOnce(&E) -> ErrorKind) {
        self.last_error = result.err().map(|err| kind(&err));
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
