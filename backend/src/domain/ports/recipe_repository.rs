//! Port for recipe persistence.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeId, RequestContext};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// No recipe exists with the given identifier.
        NotFound { id: RecipeId } =>
            "Recipe with ID {id} was not found",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// The request context was cancelled or its deadline passed.
        Cancelled =>
            "recipe repository call was cancelled",
    }
}

/// Port for reading and writing recipes.
///
/// Implementations must abort work when `ctx` is cancelled and report
/// [`RecipeRepositoryError::Cancelled`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Every stored recipe.
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// The recipe with `id`, or [`RecipeRepositoryError::NotFound`].
    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
    ) -> Result<Recipe, RecipeRepositoryError>;

    /// Store a new recipe.
    async fn add(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Overwrite an existing recipe.
    async fn update(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError>;

    /// Remove an existing recipe.
    async fn delete(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError>;
}
