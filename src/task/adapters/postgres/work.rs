//! `PostgreSQL` repository implementation for the work catalogue.

use super::{models::WorkRow, schema::works};
use crate::pg::{FolioPgPool, run_blocking};
use crate::task::{
    domain::{PersistedWorkData, Work, WorkId, WorkName},
    ports::{WorkRepository, WorkRepositoryError, WorkRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Unique index over `lower(name)`.
const NAME_UNIQUE_INDEX: &str = "idx_works_name_lower_unique";

/// `PostgreSQL`-backed work repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkRepository {
    pool: FolioPgPool,
}

impl PostgresWorkRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FolioPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkRepository for PostgresWorkRepository {
    async fn store(&self, work: &Work) -> WorkRepositoryResult<()> {
        let work_id = work.id();
        let name = work.name().clone();
        let row = WorkRow {
            id: work_id.into_inner(),
            name: work.name().as_str().to_owned(),
            role_label: work.role_label().to_owned(),
            created_at: work.created_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(works::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_name_unique_violation(info.as_ref()) =>
                    {
                        WorkRepositoryError::DuplicateName(name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkRepositoryError::DuplicateWork(work_id)
                    }
                    _ => WorkRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkId) -> WorkRepositoryResult<Option<Work>> {
        run_blocking(&self.pool, move |connection| {
            let row = works::table
                .find(id.into_inner())
                .select(WorkRow::as_select())
                .first::<WorkRow>(connection)
                .optional()
                .map_err(WorkRepositoryError::persistence)?;
            row.map(row_to_work).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &WorkName) -> WorkRepositoryResult<Option<Work>> {
        let lookup_name = name.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = diesel::sql_query(concat!(
                "SELECT id, name, role_label, created_at FROM works ",
                "WHERE lower(name) = lower($1) ",
                "LIMIT 1",
            ))
            .bind::<diesel::sql_types::Text, _>(lookup_name)
            .get_result::<WorkRow>(connection)
            .optional()
            .map_err(WorkRepositoryError::persistence)?;
            row.map(row_to_work).transpose()
        })
        .await
    }

    async fn list(&self) -> WorkRepositoryResult<Vec<Work>> {
        run_blocking(&self.pool, move |connection| {
            let rows = works::table
                .order(works::created_at.asc())
                .select(WorkRow::as_select())
                .load::<WorkRow>(connection)
                .map_err(WorkRepositoryError::persistence)?;
            rows.into_iter().map(row_to_work).collect()
        })
        .await
    }
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == NAME_UNIQUE_INDEX)
}

fn row_to_work(row: WorkRow) -> WorkRepositoryResult<Work> {
    let WorkRow {
        id,
        name: persisted_name,
        role_label,
        created_at,
    } = row;
    let name = WorkName::new(persisted_name).map_err(WorkRepositoryError::persistence)?;
    Ok(Work::from_persisted(PersistedWorkData {
        id: WorkId::from_uuid(id),
        name,
        role_label,
        created_at,
    }))
}
