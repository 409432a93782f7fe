//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation. When a migration changes the schema, update
//! this file to match (or regenerate it with `diesel print-schema`).

diesel::table! {
    /// Registered trip participants.
    ///
    /// `username` carries a unique index; `password_digest` stores the
    /// hex-encoded SHA-256 of the password.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Name rendered next to the user's contributions.
        display_name -> Varchar,
        /// Hex-encoded SHA-256 password digest.
        password_digest -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// The trip's meal catalog, fixed at trip setup.
    ///
    /// A row with a non-null `menu_url` delegates to an external menu and
    /// tracks no ingredients.
    meals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Meal name shown in every list.
        name -> Varchar,
        /// Scheduled time of day, when the trip plan fixes one.
        scheduled_for -> Nullable<Timestamptz>,
        /// External menu link; null for meals with a tracked ingredient list.
        menu_url -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Per-meal ingredient ledger.
    ///
    /// `(meal_id, name_normalized)` carries a unique constraint closing the
    /// check-then-insert race on case-insensitive duplicates.
    ingredients (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning meal.
        meal_id -> Uuid,
        /// Item name in the contributor's original casing.
        name -> Varchar,
        /// Lowercased name used for the per-meal uniqueness constraint.
        name_normalized -> Varchar,
        /// Contributing user; only they may delete the row.
        contributed_by -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user singleton linen reservations.
    ///
    /// `user_id` carries a unique constraint; `rental_sets` of zero encodes
    /// "bringing own linen".
    linen_reservations (id) {
        /// Primary key: UUID v4 identifier, preserved across updates.
        id -> Uuid,
        /// Owning user, unique across the ledger.
        user_id -> Uuid,
        /// Number of rented sets; zero means the user brings their own.
        rental_sets -> Int4,
    }
}

diesel::table! {
    /// Per-user singleton arrival declarations.
    ///
    /// `user_id` carries a unique constraint.
    arrivals (id) {
        /// Primary key: UUID v4 identifier, preserved across updates.
        id -> Uuid,
        /// Owning user, unique across the ledger.
        user_id -> Uuid,
        /// Estimated arrival at the cabin.
        arrives_at -> Timestamptz,
        /// Transport mode label: `car` or `train`.
        transport -> Varchar,
        /// Free-text notes; empty string when none were given.
        notes -> Text,
    }
}
