//! Shared harness wiring every task service over in-memory adapters.

use std::sync::Arc;

use crate::config::{
    EngineConfig, SettingsBackedConfig, adapters::memory::InMemorySettingRepository, keys,
    ports::SettingRepository,
};
use crate::identity::{
    adapters::memory::InMemoryIdentityRepository,
    domain::{Caller, Identity, IdentityKey, Role},
    ports::IdentityRepository,
};
use crate::ledger::{adapters::memory::InMemoryTransactionRepository, services::LedgerService};
use crate::task::{
    adapters::memory::{InMemoryReleaseQueue, InMemoryTaskRepository, InMemoryWorkRepository},
    domain::{Submission, Task, TaskId, Work},
    ports::RoleFinalizer,
    services::{
        CreateTaskRequest, DeadlineSweeper, ReviewService, TaskLifecycleService,
        WorkTaskRegistry,
    },
};
use crate::test_support::{ImmediateSleeper, MutableClock};
use chrono::{DateTime, TimeZone, Utc};

pub(super) type Registry =
    WorkTaskRegistry<InMemoryTaskRepository, InMemoryWorkRepository, MutableClock>;
pub(super) type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, MutableClock>;
pub(super) type Review = ReviewService<
    InMemoryTaskRepository,
    InMemoryWorkRepository,
    InMemoryTransactionRepository,
    InMemoryIdentityRepository,
    MutableClock,
>;
pub(super) type Sweeper = DeadlineSweeper<InMemoryTaskRepository, MutableClock>;

pub(super) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn key(value: &str) -> IdentityKey {
    IdentityKey::new(value).expect("valid key")
}

pub(super) fn caller(value: &str, role: Role) -> Caller {
    Caller::new(key(value), role)
}

pub(super) fn admin() -> Caller {
    caller("admin", Role::Admin)
}

pub(super) fn reviewer() -> Caller {
    caller("reviewer", Role::Reviewer)
}

pub(super) fn translation() -> Submission {
    Submission::new("translation").expect("valid work type")
}

pub(super) struct Harness {
    pub(super) clock: Arc<MutableClock>,
    pub(super) tasks: Arc<InMemoryTaskRepository>,
    pub(super) works: Arc<InMemoryWorkRepository>,
    pub(super) identities: Arc<InMemoryIdentityRepository>,
    pub(super) releases: Arc<InMemoryReleaseQueue>,
    pub(super) settings: Arc<InMemorySettingRepository>,
    transactions: Arc<InMemoryTransactionRepository>,
    config: Arc<SettingsBackedConfig<InMemorySettingRepository>>,
    pub(super) registry: Registry,
    pub(super) lifecycle: Lifecycle,
    pub(super) review: Review,
    pub(super) sweeper: Sweeper,
}

impl Harness {
    pub(super) fn new() -> Self {
        let clock = Arc::new(MutableClock::new(start_time()));
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let works = Arc::new(InMemoryWorkRepository::new());
        let identities = Arc::new(InMemoryIdentityRepository::new());
        let releases = Arc::new(InMemoryReleaseQueue::new());
        let settings = Arc::new(InMemorySettingRepository::new());
        let config = Arc::new(SettingsBackedConfig::new(
            EngineConfig::default(),
            Arc::clone(&settings),
        ));
        let transactions = Arc::new(InMemoryTransactionRepository::new());
        let ledger = LedgerService::new(
            Arc::clone(&transactions),
            Arc::clone(&identities),
            config.clone(),
            Arc::clone(&clock),
        );

        Self {
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
                Arc::clone(&works),
                ledger,
                releases.clone(),
                config.clone(),
                Arc::clone(&clock),
            ),
            sweeper: DeadlineSweeper::new(
                Arc::clone(&tasks),
                config.clone(),
                Arc::new(ImmediateSleeper),
                Arc::clone(&clock),
            ),
            transactions,
            config,
            clock,
            tasks,
            works,
            identities,
            releases,
            settings,
        }
    }

    /// Builds a review service over the same stores with another finalizer.
    pub(super) fn review_with(&self, finalizer: Arc<dyn RoleFinalizer>) -> Review {
        let ledger = LedgerService::new(
            Arc::clone(&self.transactions),
            Arc::clone(&self.identities),
            self.config.clone(),
            Arc::clone(&self.clock),
        );
        ReviewService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.works),
            ledger,
            finalizer,
            self.config.clone(),
            Arc::clone(&self.clock),
        )
    }

    /// Builds a review service over the same task stores with another
    /// identity store.
    pub(super) fn review_over<I: IdentityRepository>(
        &self,
        identities: Arc<I>,
    ) -> ReviewService<
        InMemoryTaskRepository,
        InMemoryWorkRepository,
        InMemoryTransactionRepository,
        I,
        MutableClock,
    > {
        let ledger = LedgerService::new(
            Arc::clone(&self.transactions),
            identities,
            self.config.clone(),
            Arc::clone(&self.clock),
        );
        ReviewService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.works),
            ledger,
            self.releases.clone(),
            self.config.clone(),
            Arc::clone(&self.clock),
        )
    }

    pub(super) async fn set(&self, setting: &str, value: &str) {
        self.settings
            .put(setting, value)
            .await
            .expect("setting stored");
    }

    pub(super) async fn use_strict_policy(&self) {
        self.set(keys::TRANSITION_POLICY, "strict").await;
    }

    pub(super) async fn register(&self, value: &str, role: Role) -> Caller {
        let identity =
            Identity::new(key(value), value, role, &*self.clock).expect("valid identity");
        self.identities
            .store(&identity)
            .await
            .expect("identity stored");
        caller(value, role)
    }

    pub(super) async fn points_of(&self, value: &str) -> (u64, i64) {
        let identity = self
            .identities
            .find_by_key(&key(value))
            .await
            .expect("lookup succeeds")
            .expect("identity exists");
        (identity.points(), identity.balance_minor())
    }

    pub(super) async fn work(&self, name: &str) -> Work {
        self.registry
            .create_work(&admin(), name)
            .await
            .expect("work created")
    }

    pub(super) async fn open_task(&self, work: &Work, chapter: u32) -> Task {
        self.registry
            .create_task(&admin(), CreateTaskRequest::new(work.id(), chapter))
            .await
            .expect("task created")
    }

    pub(super) async fn assigned_task(&self, work: &Work, chapter: u32, assignee: &str) -> Task {
        let task = self.open_task(work, chapter).await;
        self.lifecycle
            .assign(&admin(), task.id(), assignee)
            .await
            .expect("task assigned")
    }

    pub(super) async fn started_task(&self, work: &Work, chapter: u32, assignee: &Caller) -> Task {
        let task = self
            .assigned_task(work, chapter, assignee.identity().as_str())
            .await;
        self.lifecycle
            .start(assignee, task.id())
            .await
            .expect("task started")
    }

    pub(super) async fn submitted_task(
        &self,
        work: &Work,
        chapter: u32,
        assignee: &Caller,
    ) -> Task {
        let task = self.started_task(work, chapter, assignee).await;
        self.lifecycle
            .submit(assignee, task.id(), translation())
            .await
            .expect("task submitted")
    }

    pub(super) async fn reload(&self, id: TaskId) -> Task {
        self.registry.get_task(id).await.expect("task exists")
    }
}
