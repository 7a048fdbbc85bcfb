//! Diesel schema for ledger persistence.

diesel::table! {
    /// Append-only payout and bonus entries.
    transactions (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Beneficiary identity key.
        #[max_length = 40]
        beneficiary -> Varchar,
        /// Amount in minor currency units.
        amount_minor -> Int8,
        /// Entry kind.
        #[max_length = 20]
        kind -> Varchar,
        /// Settlement status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
