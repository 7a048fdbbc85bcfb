//! Engine configuration.
//!
//! Tunables reach the services as an explicit [`EngineConfig`] value read
//! through the [`ConfigSource`] port on every decision, so administrators can
//! adjust deadlines, sweep cadence, and reward rates without a restart.
//!
//! - Start-up layers (environment, CLI, files) in [`FolioSettings`]
//! - The runtime key/value store in [`ports`] and [`adapters`]
//! - [`SettingsBackedConfig`] overlays stored values on the start-up config

pub mod adapters;
mod engine;
mod error;
pub mod ports;
mod settings;
mod source;

pub use engine::{EngineConfig, keys};
pub use error::ConfigError;
pub use settings::FolioSettings;
pub use source::{ConfigSource, SettingsBackedConfig, StaticConfig};

#[cfg(test)]
mod tests;
