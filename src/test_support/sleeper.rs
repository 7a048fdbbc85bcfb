//! Sleepers that let tests drive the deadline sweeper loop.

use crate::task::services::Sleeper;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// Sleeper that returns at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl Sleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Sleeper that records requested durations, returns immediately for the
/// first `limit - 1` sleeps, then signals [`Self::stopped`] and never wakes.
///
/// Pass `sleeper.stopped()` as the sweeper's shutdown future to run exactly
/// `limit` sweeps.
#[derive(Debug)]
pub struct StoppingSleeper {
    remaining: AtomicUsize,
    stop: Arc<Notify>,
    requested: Mutex<Vec<Duration>>,
}

impl StoppingSleeper {
    /// Creates a sleeper that stops the loop on sleep number `limit`.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(limit),
            stop: Arc::new(Notify::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Resolves once the final sleep has been requested.
    pub async fn stopped(&self) {
        self.stop.notified().await;
    }

    /// Returns every duration passed to [`Sleeper::sleep`], in order.
    #[must_use]
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Sleeper for StoppingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        let before = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                Some(left.saturating_sub(1))
            })
            .unwrap_or(0);
        if before <= 1 {
            self.stop.notify_one();
            std::future::pending::<()>().await;
        }
    }
}
