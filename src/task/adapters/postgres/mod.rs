//! `PostgreSQL` adapters for works and tasks.

mod models;
mod repository;
mod schema;
mod work;

pub use repository::PostgresTaskRepository;
pub use work::PostgresWorkRepository;
