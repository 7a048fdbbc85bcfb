//! Identity aggregate root and payout preferences.

use super::{IdentityDomainError, IdentityKey, ParsePayoutMethodError, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Channel used when paying out an identity's balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    /// Balance kept as platform credit.
    #[default]
    Credit,
    /// Bybit transfer.
    Bybit,
    /// `PayPal` transfer.
    Paypal,
    /// Binance transfer.
    Binance,
}

impl PayoutMethod {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Bybit => "bybit",
            Self::Paypal => "paypal",
            Self::Binance => "binance",
        }
    }
}

impl TryFrom<&str> for PayoutMethod {
    type Error = ParsePayoutMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "bybit" => Ok(Self::Bybit),
            "paypal" => Ok(Self::Paypal),
            "binance" => Ok(Self::Binance),
            _ => Err(ParsePayoutMethodError(value.to_owned())),
        }
    }
}

/// Contributor or reviewer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    key: IdentityKey,
    display_name: String,
    role: Role,
    points: u64,
    balance_minor: i64,
    payout_method: PayoutMethod,
    payout_address: String,
    last_seen_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIdentityData {
    /// Persisted identity key.
    pub key: IdentityKey,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted role.
    pub role: Role,
    /// Persisted point total.
    pub points: u64,
    /// Persisted balance in minor currency units.
    pub balance_minor: i64,
    /// Persisted payout method.
    pub payout_method: PayoutMethod,
    /// Persisted payout address.
    pub payout_address: String,
    /// Persisted last-seen timestamp.
    pub last_seen_at: DateTime<Utc>,
}

impl Identity {
    /// Longest payout address representable in storage.
    pub const MAX_PAYOUT_ADDRESS_LENGTH: usize = 200;

    /// Creates a new identity with zero totals and the default payout method.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`] when the trimmed
    /// display name is empty.
    pub fn new(
        key: IdentityKey,
        display_name: impl Into<String>,
        role: Role,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            key,
            display_name: validated_display_name(display_name.into())?,
            role,
            points: 0,
            balance_minor: 0,
            payout_method: PayoutMethod::default(),
            payout_address: String::new(),
            last_seen_at: clock.utc(),
        })
    }

    /// Reconstructs an identity from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIdentityData) -> Self {
        Self {
            key: data.key,
            display_name: data.display_name,
            role: data.role,
            points: data.points,
            balance_minor: data.balance_minor,
            payout_method: data.payout_method,
            payout_address: data.payout_address,
            last_seen_at: data.last_seen_at,
        }
    }

    /// Returns the identity key.
    #[must_use]
    pub const fn key(&self) -> &IdentityKey {
        &self.key
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the role tag.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the accumulated reward points.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// Returns the accumulated balance in minor currency units.
    #[must_use]
    pub const fn balance_minor(&self) -> i64 {
        self.balance_minor
    }

    /// Returns the payout method.
    #[must_use]
    pub const fn payout_method(&self) -> PayoutMethod {
        self.payout_method
    }

    /// Returns the payout address, empty when unset.
    #[must_use]
    pub fn payout_address(&self) -> &str {
        &self.payout_address
    }

    /// Returns when the identity was last seen at the boundary.
    #[must_use]
    pub const fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_seen_at
    }

    /// Refreshes the last-seen timestamp.
    pub fn record_seen(&mut self, clock: &impl Clock) {
        self.last_seen_at = clock.utc();
    }

    /// Replaces the payout preferences; `None` clears the address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::PayoutAddressTooLong`] when the address
    /// exceeds [`Self::MAX_PAYOUT_ADDRESS_LENGTH`] characters.
    pub fn set_payout(
        &mut self,
        method: PayoutMethod,
        address: Option<String>,
    ) -> Result<(), IdentityDomainError> {
        let normalized = address
            .map(|value| value.trim().to_owned())
            .unwrap_or_default();
        if normalized.chars().count() > Self::MAX_PAYOUT_ADDRESS_LENGTH {
            return Err(IdentityDomainError::PayoutAddressTooLong(
                Self::MAX_PAYOUT_ADDRESS_LENGTH,
            ));
        }
        self.payout_method = method;
        self.payout_address = normalized;
        Ok(())
    }

    /// Changes the role tag.
    pub const fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Adds an acceptance credit to the running totals.
    ///
    /// Totals never decrease; both additions are checked so a failed credit
    /// leaves the identity untouched.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::CreditOverflow`] when either total
    /// would overflow.
    pub fn apply_credit(
        &mut self,
        points: u64,
        amount_minor: i64,
    ) -> Result<(), IdentityDomainError> {
        let overflow = || IdentityDomainError::CreditOverflow(self.key.clone());
        let next_points = self.points.checked_add(points).ok_or_else(overflow)?;
        let next_balance = self
            .balance_minor
            .checked_add(amount_minor)
            .ok_or_else(overflow)?;
        self.points = next_points;
        self.balance_minor = next_balance;
        Ok(())
    }
}

fn validated_display_name(value: String) -> Result<String, IdentityDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentityDomainError::EmptyDisplayName);
    }
    Ok(trimmed.to_owned())
}
