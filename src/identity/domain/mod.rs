//! Domain model for identities, roles, and payout preferences.

mod error;
mod identity;
mod key;
mod role;

pub use error::{IdentityDomainError, ParsePayoutMethodError, ParseRoleError};
pub use identity::{Identity, PayoutMethod, PersistedIdentityData};
pub use key::IdentityKey;
pub use role::{Caller, Role};
