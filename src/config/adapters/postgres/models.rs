//! Diesel row models for runtime settings.

use super::schema::settings;
use diesel::prelude::*;

/// Query result row and insert model for settings.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SettingRow {
    /// Setting key.
    pub key: String,
    /// Raw setting value.
    pub value: String,
}
