//! Structured logging bootstrap for binaries.

use tracing_subscriber::{EnvFilter, fmt};

/// Failure to install the global subscriber.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns [`InitError`] when a global subscriber is already installed.
pub fn init() -> Result<(), InitError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
}
