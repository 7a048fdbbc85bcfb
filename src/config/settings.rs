//! Start-up settings loaded via `OrthoConfig`.

use super::{ConfigError, EngineConfig};
use crate::ledger::domain::ConversionRate;
use crate::task::domain::TransitionPolicy;
use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Settings layered from `FOLIO_*` environment variables, CLI flags, and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOLIO")]
pub struct FolioSettings {
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Hours between `start` and the task deadline.
    pub overdue_hours: Option<u32>,
    /// Minutes between deadline sweeps.
    pub sweep_interval_minutes: Option<u32>,
    /// Default points awarded on acceptance.
    pub points_per_task: Option<u32>,
    /// Decimal currency amount paid per rate bundle, such as `0.5`.
    pub usd_per_n_points: Option<String>,
    /// Number of points in one rate bundle.
    pub usd_rate_points: Option<u32>,
    /// `permissive` or `strict`.
    pub transition_policy: Option<String>,
}

impl FolioSettings {
    /// Returns the configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Builds a validated engine configuration, falling back to defaults
    /// for unset values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is zero where a positive value is
    /// required, the rate is malformed, or the policy name is unknown.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = EngineConfig::default();
        if let Some(hours) = self.overdue_hours {
            config = config.with_overdue_hours(hours)?;
        }
        if let Some(minutes) = self.sweep_interval_minutes {
            config = config.with_sweep_interval_minutes(minutes)?;
        }
        if let Some(points) = self.points_per_task {
            config = config.with_points_per_task(points);
        }

        let default_rate = ConversionRate::default();
        let per_points = self.usd_rate_points.unwrap_or(default_rate.per_points());
        let rate = self.usd_per_n_points.as_deref().map_or_else(
            || ConversionRate::new(default_rate.minor_units(), per_points),
            |amount| ConversionRate::from_decimal(amount, per_points),
        )?;
        config = config.with_rate(rate);

        if let Some(policy) = self.transition_policy.as_deref() {
            config = config.with_transition_policy(TransitionPolicy::try_from(policy.trim())?);
        }
        Ok(config)
    }
}
