//! Diesel row models for ledger persistence.

use super::schema::transactions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row and insert model for ledger entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Beneficiary identity key.
    pub beneficiary: String,
    /// Amount in minor currency units.
    pub amount_minor: i64,
    /// Entry kind.
    pub kind: String,
    /// Settlement status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
