//! Configuration errors.

use super::ports::SettingRepositoryError;
use crate::ledger::domain::LedgerDomainError;
use crate::task::domain::ParseTransitionPolicyError;
use thiserror::Error;

/// Errors raised while assembling an [`super::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A duration setting was zero.
    #[error("{key} must be greater than zero")]
    NonPositive {
        /// Offending setting key.
        key: &'static str,
    },

    /// A stored setting could not be applied.
    #[error("invalid value '{value}' for setting {key}: {reason}")]
    InvalidSetting {
        /// Setting key.
        key: String,
        /// Rejected value.
        value: String,
        /// Parse or validation failure.
        reason: String,
    },

    /// The conversion rate is invalid.
    #[error(transparent)]
    Rate(#[from] LedgerDomainError),

    /// The transition policy name is unknown.
    #[error(transparent)]
    Policy(#[from] ParseTransitionPolicyError),

    /// The setting store could not be read.
    #[error(transparent)]
    Store(#[from] SettingRepositoryError),
}
