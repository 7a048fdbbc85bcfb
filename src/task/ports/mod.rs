//! Port contracts for the task context.

pub mod finalizer;
pub mod repository;
pub mod work;

pub use finalizer::{RoleFinalizer, RoleFinalizerError};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use work::{WorkRepository, WorkRepositoryError, WorkRepositoryResult};
