//! External identity key.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique external identity key supplied by the authentication boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Longest key representable in the `identities` table.
    pub const MAX_LENGTH: usize = 40;

    /// Creates a validated identity key.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyIdentityKey`] when the trimmed
    /// value is empty or [`IdentityDomainError::IdentityKeyTooLong`] when it
    /// exceeds [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyIdentityKey);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(IdentityDomainError::IdentityKeyTooLong {
                key: raw,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
