//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes the table, update this file (or regenerate it with
//! `diesel print-schema`).

diesel::table! {
    /// Recipes table.
    ///
    /// One row per recipe aggregate. Ingredient and instruction lists are
    /// stored in order as text arrays.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Recipe title.
        title -> Text,
        /// Short description.
        description -> Text,
        /// Preparation time in minutes.
        preparation_time -> Int4,
        /// Cooking time in minutes.
        cooking_time -> Int4,
        /// Number of servings.
        servings -> Int4,
        /// Ingredient lines in order.
        ingredients -> Array<Text>,
        /// Instruction steps in order.
        instructions -> Array<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
