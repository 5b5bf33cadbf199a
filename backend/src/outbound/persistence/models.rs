//! Diesel row types for the recipes table.
//!
//! These are internal to the persistence adapter; the domain never sees them.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::recipes;

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub preparation_time: i32,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[expect(dead_code, reason = "schema field for auditing support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for auditing support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub preparation_time: i32,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: &'a [String],
    pub instructions: &'a [String],
}

/// Changeset replacing every mutable column of a recipe.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub preparation_time: i32,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: &'a [String],
    pub instructions: &'a [String],
    pub updated_at: DateTime<Utc>,
}
