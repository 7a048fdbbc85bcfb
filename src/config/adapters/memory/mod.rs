//! In-memory setting store.

mod setting;

pub use setting::InMemorySettingRepository;
