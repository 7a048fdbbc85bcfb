//! Diesel schema for identity persistence.

diesel::table! {
    /// Contributor and reviewer identities keyed by external identity.
    identities (identity_key) {
        /// External identity key.
        #[max_length = 40]
        identity_key -> Varchar,
        /// Display name.
        #[max_length = 120]
        display_name -> Varchar,
        /// Role tag.
        #[max_length = 30]
        role -> Varchar,
        /// Accumulated reward points.
        points -> Int8,
        /// Accumulated balance in minor currency units.
        balance_minor -> Int8,
        /// Payout method selector.
        #[max_length = 20]
        payout_method -> Varchar,
        /// Payout address.
        #[max_length = 200]
        payout_address -> Varchar,
        /// Last-seen timestamp.
        last_seen_at -> Timestamptz,
    }
}
