//! `PostgreSQL` adapters for the transaction record.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTransactionRepository;
