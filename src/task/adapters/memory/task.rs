//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::identity::domain::IdentityKey;
use crate::task::{
    domain::{Task, TaskId, TaskStatus, WorkId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskState {
    /// Returns matching tasks newest first; ties on creation time list the
    /// most recently stored task first.
    fn newest_first(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut matching: Vec<Task> = self
            .insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        matching.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        matching
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.newest_first(|task| status.is_none_or(|wanted| task.status() == wanted)))
    }

    async fn find_by_statuses(
        &self,
        statuses: &[TaskStatus],
    ) -> TaskRepositoryResult<Vec<TaskRepositoryResult<Task>>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .newest_first(|task| statuses.contains(&task.status()))
            .into_iter()
            .map(Ok)
            .collect())
    }

    async fn find_by_assignee_and_work(
        &self,
        assignee: &IdentityKey,
        work_id: WorkId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.newest_first(|task| {
            task.work_id() == work_id && task.assignee() == Some(assignee)
        }))
    }

    async fn count_by_status(&self) -> TaskRepositoryResult<BTreeMap<TaskStatus, u64>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut counts = BTreeMap::new();
        for task in state.tasks.values() {
            counts
                .entry(task.status())
                .and_modify(|count: &mut u64| *count = count.saturating_add(1))
                .or_insert(1);
        }
        Ok(counts)
    }
}
