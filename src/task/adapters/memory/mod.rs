//! In-memory task context adapters.

mod release_queue;
mod task;
mod work;

pub use release_queue::InMemoryReleaseQueue;
pub use task::InMemoryTaskRepository;
pub use work::InMemoryWorkRepository;
