//! Works: the series a batch of chapter tasks belongs to.

use super::{TaskDomainError, WorkId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of a work, unique without regard to case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkName(String);

impl WorkName {
    /// Longest name representable in the `works` table.
    pub const MAX_LENGTH: usize = 120;

    /// Creates a validated, trimmed work name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyWorkName`] when the trimmed value is
    /// empty or [`TaskDomainError::WorkNameTooLong`] when it exceeds
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyWorkName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(TaskDomainError::WorkNameTooLong(Self::MAX_LENGTH));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the key used for case-insensitive uniqueness.
    #[must_use]
    pub fn uniqueness_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for WorkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A series of chapters produced by contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    id: WorkId,
    name: WorkName,
    role_label: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkData {
    /// Persisted work identifier.
    pub id: WorkId,
    /// Persisted display name.
    pub name: WorkName,
    /// Persisted external group label.
    pub role_label: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Work {
    /// Creates a work whose external group label equals its name.
    #[must_use]
    pub fn new(name: WorkName, clock: &impl Clock) -> Self {
        Self {
            id: WorkId::new(),
            role_label: name.as_str().to_owned(),
            name,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a work from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            role_label: data.role_label,
            created_at: data.created_at,
        }
    }

    /// Returns the work identifier.
    #[must_use]
    pub const fn id(&self) -> WorkId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &WorkName {
        &self.name
    }

    /// Returns the label of the external group granted to contributors.
    #[must_use]
    pub fn role_label(&self) -> &str {
        &self.role_label
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
