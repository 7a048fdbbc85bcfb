//! Diesel row models for identity persistence.

use super::schema::identities;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for identity records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = identities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IdentityRow {
    /// External identity key.
    pub identity_key: String,
    /// Display name.
    pub display_name: String,
    /// Role tag.
    pub role: String,
    /// Accumulated reward points.
    pub points: i64,
    /// Accumulated balance in minor currency units.
    pub balance_minor: i64,
    /// Payout method selector.
    pub payout_method: String,
    /// Payout address.
    pub payout_address: String,
    /// Last-seen timestamp.
    pub last_seen_at: DateTime<Utc>,
}

/// Insert model for identity records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = identities)]
pub struct NewIdentityRow {
    /// External identity key.
    pub identity_key: String,
    /// Display name.
    pub display_name: String,
    /// Role tag.
    pub role: String,
    /// Initial reward points.
    pub points: i64,
    /// Initial balance in minor currency units.
    pub balance_minor: i64,
    /// Payout method selector.
    pub payout_method: String,
    /// Payout address.
    pub payout_address: String,
    /// Last-seen timestamp.
    pub last_seen_at: DateTime<Utc>,
}

/// Profile changeset; reward totals are only changed by crediting.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = identities)]
pub struct IdentityProfileChangeset {
    /// Display name.
    pub display_name: String,
    /// Role tag.
    pub role: String,
    /// Payout method selector.
    pub payout_method: String,
    /// Payout address.
    pub payout_address: String,
    /// Last-seen timestamp.
    pub last_seen_at: DateTime<Utc>,
}
