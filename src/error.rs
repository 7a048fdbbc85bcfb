//! Caller-facing error classification shared by every service.
//!
//! Each service error type exposes `kind()` so the request boundary can map
//! outcomes to protocol responses without matching on nested variants.

use std::fmt;

/// Coarse classification of a core failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced work, task, identity, or transaction does not exist.
    NotFound,
    /// The request collides with an existing record.
    Conflict,
    /// The caller does not own the task or lacks the required role.
    Unauthorized,
    /// The task's current status does not permit the requested action.
    InvalidTransition,
    /// The request carried malformed input.
    Validation,
    /// Persistence, configuration, or arithmetic failure.
    Internal,
}

impl ErrorKind {
    /// Returns a stable lowercase label for logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::InvalidTransition => "invalid_transition",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
