//! `PostgreSQL` repository implementation for identity storage.

use super::{
    models::{IdentityProfileChangeset, IdentityRow, NewIdentityRow},
    schema::identities,
};
use crate::identity::{
    domain::{Identity, IdentityKey, PayoutMethod, PersistedIdentityData, Role},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};
use crate::pg::{FolioPgPool, run_blocking};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed identity repository.
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: FolioPgPool,
}

impl PostgresIdentityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FolioPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn store(&self, identity: &Identity) -> IdentityRepositoryResult<()> {
        let key = identity.key().clone();
        let new_row = to_new_row(identity)?;

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(identities::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IdentityRepositoryError::DuplicateIdentity(key.clone())
                    }
                    _ => IdentityRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, identity: &Identity) -> IdentityRepositoryResult<()> {
        let key = identity.key().clone();
        let changeset = IdentityProfileChangeset {
            display_name: identity.display_name().to_owned(),
            role: identity.role().as_str().to_owned(),
            payout_method: identity.payout_method().as_str().to_owned(),
            payout_address: identity.payout_address().to_owned(),
            last_seen_at: identity.last_seen_at(),
        };

        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(identities::table.find(key.as_str()))
                .set(&changeset)
                .execute(connection)
                .map_err(IdentityRepositoryError::persistence)?;
            if affected == 0 {
                return Err(IdentityRepositoryError::NotFound(key));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_key(&self, key: &IdentityKey) -> IdentityRepositoryResult<Option<Identity>> {
        let lookup_key = key.clone();
        run_blocking(&self.pool, move |connection| {
            let row = find_row(connection, &lookup_key)?;
            row.map(row_to_identity).transpose()
        })
        .await
    }

    async fn credit(
        &self,
        key: &IdentityKey,
        points: u64,
        amount_minor: i64,
    ) -> IdentityRepositoryResult<Identity> {
        let credited_key = key.clone();
        let points_delta = i64::try_from(points)
            .map_err(|_| IdentityRepositoryError::CreditOverflow(key.clone()))?;

        run_blocking(&self.pool, move |connection| {
            let updated_row = diesel::update(identities::table.find(credited_key.as_str()))
                .set((
                    identities::points.eq(identities::points + points_delta),
                    identities::balance_minor.eq(identities::balance_minor + amount_minor),
                ))
                .returning(IdentityRow::as_returning())
                .get_result::<IdentityRow>(connection)
                .optional()
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::Unknown, ref info)
                        if info.message().contains("out of range") =>
                    {
                        IdentityRepositoryError::CreditOverflow(credited_key.clone())
                    }
                    _ => IdentityRepositoryError::persistence(err),
                })?;
            let row =
                updated_row.ok_or_else(|| IdentityRepositoryError::NotFound(credited_key.clone()))?;
            row_to_identity(row)
        })
        .await
    }
}

fn find_row(
    connection: &mut PgConnection,
    key: &IdentityKey,
) -> IdentityRepositoryResult<Option<IdentityRow>> {
    identities::table
        .find(key.as_str())
        .select(IdentityRow::as_select())
        .first::<IdentityRow>(connection)
        .optional()
        .map_err(IdentityRepositoryError::persistence)
}

fn to_new_row(identity: &Identity) -> IdentityRepositoryResult<NewIdentityRow> {
    let points = i64::try_from(identity.points())
        .map_err(|_| IdentityRepositoryError::CreditOverflow(identity.key().clone()))?;
    Ok(NewIdentityRow {
        identity_key: identity.key().as_str().to_owned(),
        display_name: identity.display_name().to_owned(),
        role: identity.role().as_str().to_owned(),
        points,
        balance_minor: identity.balance_minor(),
        payout_method: identity.payout_method().as_str().to_owned(),
        payout_address: identity.payout_address().to_owned(),
        last_seen_at: identity.last_seen_at(),
    })
}

fn row_to_identity(row: IdentityRow) -> IdentityRepositoryResult<Identity> {
    let IdentityRow {
        identity_key,
        display_name,
        role: persisted_role,
        points: persisted_points,
        balance_minor,
        payout_method: persisted_payout_method,
        payout_address,
        last_seen_at,
    } = row;

    let key = IdentityKey::new(identity_key).map_err(IdentityRepositoryError::persistence)?;
    let role =
        Role::try_from(persisted_role.as_str()).map_err(IdentityRepositoryError::persistence)?;
    let payout_method = PayoutMethod::try_from(persisted_payout_method.as_str())
        .map_err(IdentityRepositoryError::persistence)?;
    let points = u64::try_from(persisted_points).map_err(IdentityRepositoryError::persistence)?;

    Ok(Identity::from_persisted(PersistedIdentityData {
        key,
        display_name,
        role,
        points,
        balance_minor,
        payout_method,
        payout_address,
        last_seen_at,
    }))
}
