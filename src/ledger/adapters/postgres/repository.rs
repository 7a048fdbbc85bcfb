//! `PostgreSQL` repository implementation for ledger entries.

use super::{models::TransactionRow, schema::transactions};
use crate::identity::domain::IdentityKey;
use crate::ledger::{
    domain::{
        LedgerEntry, PersistedLedgerEntryData, TransactionId, TransactionKind, TransactionStatus,
    },
    ports::{TransactionRepository, TransactionRepositoryError, TransactionRepositoryResult},
};
use crate::pg::{FolioPgPool, run_blocking};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed transaction repository.
#[derive(Debug, Clone)]
pub struct PostgresTransactionRepository {
    pool: FolioPgPool,
}

impl PostgresTransactionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FolioPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn append(&self, entry: &LedgerEntry) -> TransactionRepositoryResult<()> {
        let entry_id = entry.id();
        let row = to_row(entry);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(transactions::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TransactionRepositoryError::DuplicateTransaction(entry_id)
                    }
                    _ => TransactionRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_status(&self, entry: &LedgerEntry) -> TransactionRepositoryResult<()> {
        let entry_id = entry.id();
        let status = entry.status().as_str();

        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(transactions::table.find(entry_id.into_inner()))
                .set(transactions::status.eq(status))
                .execute(connection)
                .map_err(TransactionRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TransactionRepositoryError::NotFound(entry_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> TransactionRepositoryResult<Option<LedgerEntry>> {
        run_blocking(&self.pool, move |connection| {
            let row = transactions::table
                .find(id.into_inner())
                .select(TransactionRow::as_select())
                .first::<TransactionRow>(connection)
                .optional()
                .map_err(TransactionRepositoryError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn list_for_beneficiary(
        &self,
        beneficiary: &IdentityKey,
    ) -> TransactionRepositoryResult<Vec<LedgerEntry>> {
        let lookup_key = beneficiary.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let rows = transactions::table
                .filter(transactions::beneficiary.eq(lookup_key))
                .order(transactions::created_at.desc())
                .select(TransactionRow::as_select())
                .load::<TransactionRow>(connection)
                .map_err(TransactionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn to_row(entry: &LedgerEntry) -> TransactionRow {
    TransactionRow {
        id: entry.id().into_inner(),
        beneficiary: entry.beneficiary().as_str().to_owned(),
        amount_minor: entry.amount_minor(),
        kind: entry.kind().as_str().to_owned(),
        status: entry.status().as_str().to_owned(),
        created_at: entry.created_at(),
    }
}

fn row_to_entry(row: TransactionRow) -> TransactionRepositoryResult<LedgerEntry> {
    let TransactionRow {
        id,
        beneficiary: persisted_beneficiary,
        amount_minor,
        kind: persisted_kind,
        status: persisted_status,
        created_at,
    } = row;

    let beneficiary = IdentityKey::new(persisted_beneficiary)
        .map_err(TransactionRepositoryError::persistence)?;
    let kind = TransactionKind::try_from(persisted_kind.as_str())
        .map_err(TransactionRepositoryError::persistence)?;
    let status = TransactionStatus::try_from(persisted_status.as_str())
        .map_err(TransactionRepositoryError::persistence)?;

    Ok(LedgerEntry::from_persisted(PersistedLedgerEntryData {
        id: TransactionId::from_uuid(id),
        beneficiary,
        amount_minor,
        kind,
        status,
        created_at,
    }))
}
