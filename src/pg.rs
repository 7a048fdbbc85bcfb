//! Shared `PostgreSQL` plumbing for the Diesel adapters.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by every adapter.
pub type FolioPgPool = Pool<ConnectionManager<PgConnection>>;

/// Failure raised before an adapter closure gets to run.
#[derive(Debug, Error)]
pub enum BlockingError {
    /// No connection could be checked out of the pool.
    #[error("connection pool checkout failed: {0}")]
    Pool(#[source] PoolError),
    /// The blocking task panicked or was cancelled.
    #[error("blocking database task failed: {0}")]
    Join(#[source] tokio::task::JoinError),
}

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn build_pool(database_url: &str) -> Result<FolioPgPool, PoolError> {
    Pool::builder().build(ConnectionManager::<PgConnection>::new(database_url))
}

/// Runs a synchronous Diesel closure on the blocking thread pool.
///
/// Each call checks out one connection, so a closure is the unit of
/// read-modify-write against the store.
pub(crate) async fn run_blocking<F, T, E>(pool: &FolioPgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<BlockingError> + Send + 'static,
{
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get().map_err(BlockingError::Pool)?;
        f(&mut connection)
    })
    .await
    .map_err(BlockingError::Join)?
}
