//! Configuration sources read by the services.

use super::{ConfigError, EngineConfig, ports::SettingRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the engine configuration in force for the next decision.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Returns the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the backing store cannot be read or holds
    /// an invalid value.
    async fn current(&self) -> Result<EngineConfig, ConfigError>;
}

/// Fixed configuration, suitable for tests and embedding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticConfig {
    config: EngineConfig,
}

impl StaticConfig {
    /// Wraps a fixed configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConfigSource for StaticConfig {
    async fn current(&self) -> Result<EngineConfig, ConfigError> {
        Ok(self.config)
    }
}

/// Start-up configuration overlaid with values from the setting store.
#[derive(Clone)]
pub struct SettingsBackedConfig<S>
where
    S: SettingRepository,
{
    base: EngineConfig,
    store: Arc<S>,
}

impl<S> SettingsBackedConfig<S>
where
    S: SettingRepository,
{
    /// Creates an overlay on top of `base`.
    #[must_use]
    pub const fn new(base: EngineConfig, store: Arc<S>) -> Self {
        Self { base, store }
    }
}

#[async_trait]
impl<S> ConfigSource for SettingsBackedConfig<S>
where
    S: SettingRepository,
{
    async fn current(&self) -> Result<EngineConfig, ConfigError> {
        self.store
            .all()
            .await?
            .iter()
            .try_fold(self.base, |config, (key, value)| {
                config.apply_setting(key, value)
            })
    }
}
