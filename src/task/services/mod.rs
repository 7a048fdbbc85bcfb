//! Application services for the work/task catalogue, the task lifecycle,
//! reviews, and deadline enforcement.

mod lifecycle;
mod registry;
mod review;
mod sweeper;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use registry::{
    CreateTaskRequest, RegistryError, RegistryResult, TaskSummary, WorkTaskRegistry,
};
pub use review::{
    ReviewOutcome, ReviewRequest, ReviewService, ReviewServiceError, ReviewServiceResult,
};
pub use sweeper::{DeadlineSweeper, Sleeper, SweepReport, TokioSleeper};
