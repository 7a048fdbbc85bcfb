//! Domain model for works, tasks, and the task lifecycle.
//!
//! Tasks move through an explicit transition table. Whether every edge is
//! enforced depends on the configured [`TransitionPolicy`]; the identity guard
//! on `start` and `submit`, and the deadline precondition on the sweep, hold
//! under every policy.

mod error;
mod ids;
mod review;
mod status;
mod task;
mod work;

pub use error::{
    ParseReviewDecisionError, ParseTaskStatusError, ParseTransitionPolicyError, TaskDomainError,
};
pub use ids::{ChapterNumber, TaskId, WorkId};
pub use review::{DesignationRelease, ReviewDecision};
pub use status::{TaskAction, TaskStatus, TransitionPolicy};
pub use task::{PersistedTaskData, Submission, Task};
pub use work::{PersistedWorkData, Work, WorkName};
