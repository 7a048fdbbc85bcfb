//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskLifecycleChangeset, TaskRow},
    schema::tasks,
};
use crate::identity::domain::IdentityKey;
use crate::pg::{FolioPgPool, run_blocking};
use crate::task::{
    domain::{ChapterNumber, PersistedTaskData, Task, TaskId, TaskStatus, WorkId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeMap;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: FolioPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FolioPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let work_id = task.work_id();
        let row = to_row(task)?;

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::UnknownWork(work_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskLifecycleChangeset {
            assignee: task.assignee().map(|key| key.as_str().to_owned()),
            status: task.status().as_str().to_owned(),
            work_type: task.work_type().map(str::to_owned),
            link: task.link().map(str::to_owned),
            review_note: task.review_note().map(str::to_owned),
            due_at: task.due_at(),
            updated_at: task.updated_at(),
        };

        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::created_at.desc())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(tasks::status.eq(wanted.as_str()));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_statuses(
        &self,
        statuses: &[TaskStatus],
    ) -> TaskRepositoryResult<Vec<TaskRepositoryResult<Task>>> {
        let names: Vec<&'static str> = statuses.iter().map(|status| status.as_str()).collect();
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq_any(names))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(decode_listed_row).collect())
        })
        .await
    }

    async fn find_by_assignee_and_work(
        &self,
        assignee: &IdentityKey,
        work_id: WorkId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let assignee_key = assignee.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee.eq(assignee_key))
                .filter(tasks::work_id.eq(work_id.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_by_status(&self) -> TaskRepositoryResult<BTreeMap<TaskStatus, u64>> {
        run_blocking(&self.pool, move |connection| {
            let grouped = tasks::table
                .group_by(tasks::status)
                .select((tasks::status, diesel::dsl::count(tasks::id)))
                .load::<(String, i64)>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            grouped
                .into_iter()
                .map(|(persisted_status, count)| {
                    let status = TaskStatus::try_from(persisted_status.as_str())
                        .map_err(TaskRepositoryError::persistence)?;
                    let total = u64::try_from(count).map_err(TaskRepositoryError::persistence)?;
                    Ok((status, total))
                })
                .collect()
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let chapter_number =
        i32::try_from(task.chapter().value()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskRow {
        id: task.id().into_inner(),
        work_id: task.work_id().into_inner(),
        chapter_number,
        assignee: task.assignee().map(|key| key.as_str().to_owned()),
        status: task.status().as_str().to_owned(),
        work_type: task.work_type().map(str::to_owned),
        link: task.link().map(str::to_owned),
        review_note: task.review_note().map(str::to_owned),
        due_at: task.due_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

/// Decodes one listed row, naming the row in the error so a skipped task can
/// be traced back to storage.
fn decode_listed_row(row: TaskRow) -> TaskRepositoryResult<Task> {
    let row_id = row.id;
    row_to_task(row).map_err(|err| {
        TaskRepositoryError::persistence(std::io::Error::other(format!(
            "task {row_id} could not be decoded: {err}"
        )))
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        work_id,
        chapter_number,
        assignee: persisted_assignee,
        status: persisted_status,
        work_type,
        link,
        review_note,
        due_at,
        created_at,
        updated_at,
    } = row;

    let chapter = u32::try_from(chapter_number)
        .map_err(TaskRepositoryError::persistence)
        .and_then(|value| ChapterNumber::new(value).map_err(TaskRepositoryError::persistence))?;
    let assignee = persisted_assignee
        .map(IdentityKey::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        work_id: WorkId::from_uuid(work_id),
        chapter,
        assignee,
        status,
        work_type,
        link,
        review_note,
        due_at,
        created_at,
        updated_at,
    }))
}
