//! Role tags and the verified caller pair supplied by the boundary.

use super::{IdentityDomainError, IdentityKey, ParseRoleError};
use serde::{Deserialize, Serialize};

/// Role tag attached to an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Contributor who claims and completes tasks.
    #[default]
    Member,
    /// Resolves submissions.
    Reviewer,
    /// Creates works and tasks and assigns contributors.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
        }
    }

    /// Returns `true` when the role may accept, reject, or request changes.
    #[must_use]
    pub const fn can_review(self) -> bool {
        matches!(self, Self::Reviewer | Self::Admin)
    }

    /// Returns `true` when the role may create works, create tasks, and
    /// assign contributors.
    #[must_use]
    pub const fn can_administer(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "reviewer" => Ok(Self::Reviewer),
            // Legacy dashboards issued "owner" tokens with admin rights.
            "admin" | "owner" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Verified `(identity, role)` pair passed in by the request boundary.
///
/// The core trusts this pair; session and signature validation happen
/// before it is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    identity: IdentityKey,
    role: Role,
}

impl Caller {
    /// Creates a caller from an already-verified identity and role.
    #[must_use]
    pub const fn new(identity: IdentityKey, role: Role) -> Self {
        Self { identity, role }
    }

    /// Returns the caller's identity key.
    #[must_use]
    pub const fn identity(&self) -> &IdentityKey {
        &self.identity
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Checks that the caller may review submissions.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MissingCapability`] for members.
    pub fn require_reviewer(&self) -> Result<(), IdentityDomainError> {
        self.require(self.role.can_review(), "review")
    }

    /// Checks that the caller may perform administrative actions.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MissingCapability`] for members and
    /// reviewers.
    pub fn require_admin(&self) -> Result<(), IdentityDomainError> {
        self.require(self.role.can_administer(), "admin")
    }

    fn require(&self, granted: bool, required: &'static str) -> Result<(), IdentityDomainError> {
        if granted {
            return Ok(());
        }
        Err(IdentityDomainError::MissingCapability {
            identity: self.identity.clone(),
            required,
        })
    }
}
