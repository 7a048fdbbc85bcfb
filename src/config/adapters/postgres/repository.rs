//! `PostgreSQL` repository implementation for runtime settings.

use super::{models::SettingRow, schema::settings};
use crate::config::ports::{SettingRepository, SettingRepositoryError, SettingRepositoryResult};
use crate::pg::{FolioPgPool, run_blocking};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;

/// `PostgreSQL`-backed setting store.
#[derive(Debug, Clone)]
pub struct PostgresSettingRepository {
    pool: FolioPgPool,
}

impl PostgresSettingRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FolioPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for PostgresSettingRepository {
    async fn get(&self, key: &str) -> SettingRepositoryResult<Option<String>> {
        let lookup_key = key.trim().to_owned();
        run_blocking(&self.pool, move |connection| {
            settings::table
                .find(lookup_key)
                .select(settings::value)
                .first::<String>(connection)
                .optional()
                .map_err(SettingRepositoryError::persistence)
        })
        .await
    }

    async fn put(&self, key: &str, value: &str) -> SettingRepositoryResult<()> {
        let trimmed_key = key.trim();
        if trimmed_key.is_empty() {
            return Err(SettingRepositoryError::EmptyKey);
        }
        let row = SettingRow {
            key: trimmed_key.to_owned(),
            value: value.to_owned(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(settings::table)
                .values(&row)
                .on_conflict(settings::key)
                .do_update()
                .set(settings::value.eq(excluded(settings::value)))
                .execute(connection)
                .map_err(SettingRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn all(&self) -> SettingRepositoryResult<Vec<(String, String)>> {
        run_blocking(&self.pool, move |connection| {
            let rows = settings::table
                .order(settings::key.asc())
                .select(SettingRow::as_select())
                .load::<SettingRow>(connection)
                .map_err(SettingRepositoryError::persistence)?;
            Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
        })
        .await
    }
}
