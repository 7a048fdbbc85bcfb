//! Port contracts for the runtime setting store.

pub mod repository;

pub use repository::{SettingRepository, SettingRepositoryError, SettingRepositoryResult};
