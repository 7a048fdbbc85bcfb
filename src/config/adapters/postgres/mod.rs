//! `PostgreSQL` setting store.

mod models;
mod repository;
mod schema;

pub use repository::PostgresSettingRepository;
