//! Diesel row models for work and task persistence.

use super::schema::{tasks, works};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row and insert model for works.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = works)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkRow {
    /// Work identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// External group label.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub role_label: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Query result row and insert model for tasks.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning work.
    pub work_id: Uuid,
    /// Chapter number.
    pub chapter_number: i32,
    /// Assignee identity key.
    pub assignee: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Work-type tag.
    pub work_type: Option<String>,
    /// Artifact link.
    pub link: Option<String>,
    /// Latest reviewer note.
    pub review_note: Option<String>,
    /// Deadline.
    pub due_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for task lifecycle updates; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskLifecycleChangeset {
    /// Assignee identity key.
    pub assignee: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Work-type tag.
    pub work_type: Option<String>,
    /// Artifact link.
    pub link: Option<String>,
    /// Latest reviewer note.
    pub review_note: Option<String>,
    /// Deadline.
    pub due_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
