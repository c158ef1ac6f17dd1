//! Diesel schema for identity and task persistence.

diesel::table! {
    /// Registered identities with their password hashes.
    identities (id) {
        /// Surrogate identity key.
        id -> BigInt,
        /// Unique login name.
        username -> Text,
        /// PHC-format password hash.
        password_hash -> Text,
        /// Registration timestamp.
        created_at -> TimestamptzSqlite,
    }
}

diesel::table! {
    /// Task items bound to an owning username.
    tasks (id) {
        /// Surrogate task key.
        id -> BigInt,
        /// Task title.
        title -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Owning username, referencing `identities.username`.
        owner -> Text,
        /// Creation timestamp.
        created_at -> TimestamptzSqlite,
        /// Last update timestamp.
        updated_at -> TimestamptzSqlite,
    }
}
