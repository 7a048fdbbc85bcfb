//! Diesel schema for work and task persistence.

diesel::table! {
    /// Catalogue of works; names are unique without regard to case.
    works (id) {
        /// Work identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 120]
        name -> Varchar,
        /// External group label.
        #[max_length = 120]
        role_label -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Chapter tasks and their lifecycle fields.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning work.
        work_id -> Uuid,
        /// Chapter number.
        chapter_number -> Int4,
        /// Assignee identity key.
        #[max_length = 40]
        assignee -> Nullable<Varchar>,
        /// Lifecycle status.
        #[max_length = 30]
        status -> Varchar,
        /// Work-type tag set on submission.
        #[max_length = 20]
        work_type -> Nullable<Varchar>,
        /// Artifact link.
        link -> Nullable<Text>,
        /// Latest reviewer note.
        review_note -> Nullable<Text>,
        /// Deadline set when work starts.
        due_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> works (work_id));
diesel::allow_tables_to_appear_in_same_query!(works, tasks);
