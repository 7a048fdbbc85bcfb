//! Validated engine tunables.

use super::ConfigError;
use crate::ledger::domain::{ConversionRate, parse_minor_units};
use crate::task::domain::TransitionPolicy;
use chrono::TimeDelta;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;

/// Setting-store keys understood by [`EngineConfig::apply_setting`].
pub mod keys {
    /// Hours between `start` and the task deadline.
    pub const OVERDUE_HOURS: &str = "overdue_hours";
    /// Minutes the sweeper sleeps between cycles.
    pub const SWEEP_INTERVAL_MINUTES: &str = "sweep_interval_minutes";
    /// Points awarded on acceptance when the reviewer gives no override.
    pub const POINTS_PER_TASK: &str = "points_per_task";
    /// Decimal currency amount paid per rate bundle, such as `0.5`.
    pub const USD_PER_N_POINTS: &str = "usd_per_n_points";
    /// Number of points in one rate bundle.
    pub const USD_RATE_POINTS: &str = "usd_rate_points";
    /// `permissive` or `strict`.
    pub const TRANSITION_POLICY: &str = "transition_policy";
}

/// Engine tunables shared by the lifecycle, review, and sweep services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    overdue_hours: u32,
    sweep_interval_minutes: u32,
    points_per_task: u32,
    rate: ConversionRate,
    transition_policy: TransitionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overdue_hours: Self::DEFAULT_OVERDUE_HOURS,
            sweep_interval_minutes: Self::DEFAULT_SWEEP_INTERVAL_MINUTES,
            points_per_task: Self::DEFAULT_POINTS_PER_TASK,
            rate: ConversionRate::default(),
            transition_policy: TransitionPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Default deadline window in hours.
    pub const DEFAULT_OVERDUE_HOURS: u32 = 24;
    /// Default sweep interval in minutes.
    pub const DEFAULT_SWEEP_INTERVAL_MINUTES: u32 = 30;
    /// Default points awarded per accepted task.
    pub const DEFAULT_POINTS_PER_TASK: u32 = 15;

    /// Sets the deadline window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] when `hours` is zero.
    pub const fn with_overdue_hours(mut self, hours: u32) -> Result<Self, ConfigError> {
        if hours == 0 {
            return Err(ConfigError::NonPositive {
                key: keys::OVERDUE_HOURS,
            });
        }
        self.overdue_hours = hours;
        Ok(self)
    }

    /// Sets the sweep interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] when `minutes` is zero.
    pub const fn with_sweep_interval_minutes(mut self, minutes: u32) -> Result<Self, ConfigError> {
        if minutes == 0 {
            return Err(ConfigError::NonPositive {
                key: keys::SWEEP_INTERVAL_MINUTES,
            });
        }
        self.sweep_interval_minutes = minutes;
        Ok(self)
    }

    /// Sets the default acceptance award.
    #[must_use]
    pub const fn with_points_per_task(mut self, points: u32) -> Self {
        self.points_per_task = points;
        self
    }

    /// Sets the points-to-currency conversion rate.
    #[must_use]
    pub const fn with_rate(mut self, rate: ConversionRate) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the transition enforcement policy.
    #[must_use]
    pub const fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Returns the deadline window in hours.
    #[must_use]
    pub const fn overdue_hours(&self) -> u32 {
        self.overdue_hours
    }

    /// Returns the deadline window as a duration added to `now` on start.
    #[must_use]
    pub fn overdue_window(&self) -> TimeDelta {
        TimeDelta::try_hours(i64::from(self.overdue_hours)).unwrap_or(TimeDelta::MAX)
    }

    /// Returns the sweep interval in minutes.
    #[must_use]
    pub const fn sweep_interval_minutes(&self) -> u32 {
        self.sweep_interval_minutes
    }

    /// Returns the sweep interval as a sleep duration.
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.sweep_interval_minutes) * SECONDS_PER_MINUTE)
    }

    /// Returns the default acceptance award.
    #[must_use]
    pub const fn points_per_task(&self) -> u32 {
        self.points_per_task
    }

    /// Returns the conversion rate.
    #[must_use]
    pub const fn rate(&self) -> ConversionRate {
        self.rate
    }

    /// Returns the transition enforcement policy.
    #[must_use]
    pub const fn transition_policy(&self) -> TransitionPolicy {
        self.transition_policy
    }

    /// Applies one string-valued setting from the runtime store.
    ///
    /// Keys outside [`keys`] are ignored so the store can hold settings for
    /// other components.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] when the value does not parse
    /// or fails validation.
    pub fn apply_setting(self, key: &str, value: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidSetting {
            key: key.to_owned(),
            value: value.to_owned(),
            reason,
        };
        let parse_count = || value.trim().parse::<u32>().map_err(|err| invalid(err.to_string()));

        let updated = match key {
            keys::OVERDUE_HOURS => self.with_overdue_hours(parse_count()?),
            keys::SWEEP_INTERVAL_MINUTES => self.with_sweep_interval_minutes(parse_count()?),
            keys::POINTS_PER_TASK => Ok(self.with_points_per_task(parse_count()?)),
            keys::USD_PER_N_POINTS => parse_minor_units(value)
                .and_then(|minor_units| ConversionRate::new(minor_units, self.rate.per_points()))
                .map(|rate| self.with_rate(rate))
                .map_err(ConfigError::from),
            keys::USD_RATE_POINTS => ConversionRate::new(self.rate.minor_units(), parse_count()?)
                .map(|rate| self.with_rate(rate))
                .map_err(ConfigError::from),
            keys::TRANSITION_POLICY => TransitionPolicy::try_from(value.trim())
                .map(|policy| self.with_transition_policy(policy))
                .map_err(ConfigError::from),
            _ => Ok(self),
        };
        updated.map_err(|err| match err {
            ConfigError::InvalidSetting { .. } => err,
            other => invalid(other.to_string()),
        })
    }
}
