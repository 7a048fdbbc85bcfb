//! In-memory queue of designation releases for the messaging surface to
//! poll.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::DesignationRelease,
    ports::{RoleFinalizer, RoleFinalizerError},
};

/// Thread-safe FIFO of pending designation releases.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReleaseQueue {
    pending: Arc<Mutex<VecDeque<DesignationRelease>>>,
}

impl InMemoryReleaseQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued release, oldest first.
    ///
    /// A poisoned queue yields nothing.
    #[must_use]
    pub fn drain(&self) -> Vec<DesignationRelease> {
        self.pending
            .lock()
            .map(|mut pending| pending.drain(..).collect())
            .unwrap_or_default()
    }

    /// Returns the number of queued releases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().map(|pending| pending.len()).unwrap_or(0)
    }

    /// Returns `true` when no release is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RoleFinalizer for InMemoryReleaseQueue {
    async fn release(&self, release: DesignationRelease) -> Result<(), RoleFinalizerError> {
        let mut pending = self
            .pending
            .lock()
            .map_err(|err| RoleFinalizerError::delivery(std::io::Error::other(err.to_string())))?;
        pending.push_back(release);
        Ok(())
    }
}
