//! Diesel schema for runtime settings.

diesel::table! {
    /// Runtime-tunable key/value settings.
    settings (key) {
        /// Setting key.
        #[max_length = 64]
        key -> Varchar,
        /// Raw setting value.
        value -> Text,
    }
}
