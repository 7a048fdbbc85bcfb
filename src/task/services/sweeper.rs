//! Deadline sweeper: the recurring job that moves lapsed tasks to `overdue`.

use crate::config::{ConfigSource, EngineConfig};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryResult},
};
use async_trait::async_trait;
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Asynchronous sleep used between sweeps.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Counts from one sweep cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    examined: usize,
    marked_overdue: usize,
    failed: usize,
}

impl SweepReport {
    /// Returns the number of `assigned` and `in_progress` tasks inspected.
    #[must_use]
    pub const fn examined(&self) -> usize {
        self.examined
    }

    /// Returns the number of tasks moved to `overdue`.
    #[must_use]
    pub const fn marked_overdue(&self) -> usize {
        self.marked_overdue
    }

    /// Returns the number of tasks that could not be decoded, reloaded or
    /// saved.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }
}

/// Recurring deadline enforcement over the task store.
#[derive(Clone)]
pub struct DeadlineSweeper<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    config: Arc<dyn ConfigSource>,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<C>,
}

impl<R, C> DeadlineSweeper<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        config: Arc<dyn ConfigSource>,
        sleeper: Arc<dyn Sleeper>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            config,
            sleeper,
            clock,
        }
    }

    /// Runs one sweep over every `assigned` and `in_progress` task.
    ///
    /// A task that cannot be decoded, reloaded or saved is logged and counted,
    /// and the rest of the batch still runs. Sweeping twice at the same instant marks
    /// nothing the second time.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the batch itself cannot be listed.
    pub async fn sweep_once(&self) -> TaskRepositoryResult<SweepReport> {
        let listed = self
            .repository
            .find_by_statuses(&TaskStatus::SWEEPABLE)
            .await?;
        let now = self.clock.utc();
        let mut report = SweepReport {
            examined: listed.len(),
            ..SweepReport::default()
        };

        let mut candidates = Vec::with_capacity(listed.len());
        for entry in listed {
            match entry {
                Ok(task) => candidates.push(task),
                Err(err) => {
                    warn!(error = %err, "skipping undecodable task");
                    report.failed = report.failed.saturating_add(1);
                }
            }
        }

        for candidate in candidates.iter().filter(|task| task.is_past_deadline(now)) {
            match self.mark_overdue(candidate).await {
                Ok(true) => report.marked_overdue = report.marked_overdue.saturating_add(1),
                Ok(false) => {}
                Err(err) => {
                    warn!(task = %candidate.id(), error = %err, "failed to mark task overdue");
                    report.failed = report.failed.saturating_add(1);
                }
            }
        }
        Ok(report)
    }

    /// Sweeps immediately, then again after each configured interval until
    /// `shutdown` resolves. Returns the number of sweeps run.
    ///
    /// The interval is re-read after every sweep; when configuration cannot
    /// be read the previous interval is kept. Sweep failures are logged and
    /// never end the loop.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) -> u64 {
        tokio::pin!(shutdown);
        let mut interval = EngineConfig::default().sweep_interval();
        let mut sweeps: u64 = 0;

        loop {
            self.run_cycle().await;
            sweeps = sweeps.saturating_add(1);
            interval = self.next_interval(interval).await;

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!(sweeps, "deadline sweeper stopping");
                    return sweeps;
                }
                () = self.sleeper.sleep(interval) => {}
            }
        }
    }

    async fn run_cycle(&self) {
        match self.sweep_once().await {
            Ok(report) if report.marked_overdue() > 0 || report.failed() > 0 => info!(
                examined = report.examined(),
                marked_overdue = report.marked_overdue(),
                failed = report.failed(),
                "deadline sweep finished"
            ),
            Ok(report) => debug!(examined = report.examined(), "deadline sweep found nothing"),
            Err(err) => error!(error = %err, "deadline sweep failed; retrying next interval"),
        }
    }

    async fn next_interval(&self, previous: Duration) -> Duration {
        match self.config.current().await {
            Ok(config) => config.sweep_interval(),
            Err(err) => {
                warn!(error = %err, "could not read sweep interval; keeping previous");
                previous
            }
        }
    }

    /// Reloads the task so a concurrent request is not overwritten with a
    /// stale snapshot, then marks it.
    async fn mark_overdue(&self, candidate: &Task) -> TaskRepositoryResult<bool> {
        let Some(mut task) = self.repository.find_by_id(candidate.id()).await? else {
            return Ok(false);
        };
        if !task.mark_overdue(&*self.clock) {
            return Ok(false);
        }
        self.repository.update(&task).await?;
        info!(task = %task.id(), due_at = ?task.due_at(), "task marked overdue");
        Ok(true)
    }
}
