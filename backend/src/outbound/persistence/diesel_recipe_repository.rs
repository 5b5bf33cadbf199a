//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Rows are loaded through the validated `Recipe::restore` constructor, so a
//! row edited outside the application that breaks an invariant surfaces as a
//! query error rather than an invalid aggregate.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Recipe, RecipeDraft, RecipeId, RequestContext};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::guarded;
use super::models::{NewRecipeRow, RecipeChangeset, RecipeRow};
use super::pool::DbPool;
use super::schema::recipes;

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone, Debug)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a validated recipe.
fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipeRepositoryError> {
    let RecipeRow {
        id,
        title,
        description,
        preparation_time,
        cooking_time,
        servings,
        ingredients,
        instructions,
        created_at: _,
        updated_at: _,
    } = row;

    Recipe::restore(
        RecipeId::from_uuid(id),
        RecipeDraft {
            title,
            description,
            preparation_time,
            cooking_time,
            servings,
            ingredients,
            instructions,
        },
    )
    .map_err(|failure| RecipeRepositoryError::query(format!("stored recipe {id} is invalid: {failure}")))
}

fn new_row(recipe: &Recipe) -> NewRecipeRow<'_> {
    NewRecipeRow {
        id: *recipe.id().as_uuid(),
        title: recipe.title(),
        description: recipe.description(),
        preparation_time: recipe.preparation_time(),
        cooking_time: recipe.cooking_time(),
        servings: recipe.servings(),
        ingredients: recipe.ingredients(),
        instructions: recipe.instructions(),
    }
}

fn changeset(recipe: &Recipe) -> RecipeChangeset<'_> {
    RecipeChangeset {
        title: recipe.title(),
        description: recipe.description(),
        preparation_time: recipe.preparation_time(),
        cooking_time: recipe.cooking_time(),
        servings: recipe.servings(),
        ingredients: recipe.ingredients(),
        instructions: recipe.instructions(),
        updated_at: Utc::now(),
    }
}

fn expect_one_row(affected: usize, id: &RecipeId) -> Result<(), RecipeRepositoryError> {
    if affected == 0 {
        Err(RecipeRepositoryError::not_found(*id))
    } else {
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        guarded(ctx, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let rows: Vec<RecipeRow> = recipes::table
                .order((recipes::created_at.asc(), recipes::id.asc()))
                .select(RecipeRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            rows.into_iter().map(row_to_recipe).collect()
        })
        .await
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
    ) -> Result<Recipe, RecipeRepositoryError> {
        guarded(ctx, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let row = recipes::table
                .filter(recipes::id.eq(id.as_uuid()))
                .select(RecipeRow::as_select())
                .first::<RecipeRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

            row.map_or_else(|| Err(RecipeRepositoryError::not_found(*id)), row_to_recipe)
        })
        .await
    }

    async fn add(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        guarded(ctx, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            diesel::insert_into(recipes::table)
                .values(&new_row(recipe))
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        guarded(ctx, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let affected = diesel::update(recipes::table.filter(recipes::id.eq(recipe.id().as_uuid())))
                .set(&changeset(recipe))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            expect_one_row(affected, recipe.id())
        })
        .await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        guarded(ctx, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let affected = diesel::delete(recipes::table.filter(recipes::id.eq(recipe.id().as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            expect_one_row(affected, recipe.id())
        })
        .await
    }
}
