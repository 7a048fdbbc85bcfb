//! Outbound port for releasing external group designations.

use crate::task::domain::DesignationRelease;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Receives a signal when an assignee has no open tasks left in a work.
///
/// The messaging surface decides what a release means, typically removing
/// the work's group from the member.
#[async_trait]
pub trait RoleFinalizer: Send + Sync {
    /// Delivers one release.
    ///
    /// # Errors
    ///
    /// Returns [`RoleFinalizerError`] when the release cannot be delivered.
    async fn release(&self, release: DesignationRelease) -> Result<(), RoleFinalizerError>;
}

/// Errors returned by role finalizer implementations.
#[derive(Debug, Clone, Error)]
pub enum RoleFinalizerError {
    /// The release could not be handed to the messaging surface.
    #[error("designation release delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoleFinalizerError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
