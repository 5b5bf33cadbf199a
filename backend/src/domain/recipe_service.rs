//! Recipe use cases.
//!
//! Each use case is a [`Request`] with a dedicated [`RequestHandler`]. Not
//! found and validation problems come back as [`Failure`] values; storage
//! faults are logged and wrapped with a context message. Nothing here
//! retries or spawns background work.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    DispatchError, DispatcherBuilder, Failure, Outcome, Recipe, RecipeDraft, RecipeId,
    RecipeLimits, RecipePayload, Request, RequestContext, RequestHandler,
};

/// Create a recipe from a draft.
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    /// Field values of the new recipe.
    pub draft: RecipeDraft,
}

impl Request for CreateRecipe {
    type Output = Outcome<RecipePayload>;
}

/// Replace every field of an existing recipe.
#[derive(Debug, Clone)]
pub struct UpdateRecipe {
    /// Recipe to update.
    pub id: RecipeId,
    /// New field values.
    pub draft: RecipeDraft,
}

impl Request for UpdateRecipe {
    type Output = Outcome<()>;
}

/// Delete a recipe.
#[derive(Debug, Clone, Copy)]
pub struct DeleteRecipe {
    /// Recipe to delete.
    pub id: RecipeId,
}

impl Request for DeleteRecipe {
    type Output = Outcome<()>;
}

/// Read one recipe.
#[derive(Debug, Clone, Copy)]
pub struct GetRecipeById {
    /// Recipe to read.
    pub id: RecipeId,
}

impl Request for GetRecipeById {
    type Output = Outcome<RecipePayload>;
}

/// Read every recipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllRecipes;

impl Request for GetAllRecipes {
    type Output = Outcome<Vec<RecipePayload>>;
}

fn map_repository_error(context: &str, error: RecipeRepositoryError) -> Failure {
    match error {
        RecipeRepositoryError::NotFound { id } => {
            warn!(recipe_id = %id, "recipe not found");
            Failure::not_found(RecipeRepositoryError::not_found(id).to_string())
        }
        RecipeRepositoryError::Connection { message } => {
            error!(%message, "{context}");
            Failure::unavailable(context, message)
        }
        RecipeRepositoryError::Cancelled => {
            warn!("{context}: storage call cancelled");
            Failure::unavailable(context, RecipeRepositoryError::Cancelled)
        }
        RecipeRepositoryError::Query { message } => {
            error!(%message, "{context}");
            Failure::unexpected(context, message)
        }
    }
}

/// Entity invariants first, then size limits.
fn check_draft(limits: &RecipeLimits, draft: &RecipeDraft) -> Outcome<()> {
    let mut errors = draft.violations();
    errors.extend(limits.check(draft));
    Failure::check(errors)
}

async fn load<R>(
    repository: &R,
    ctx: &RequestContext,
    id: &RecipeId,
    context: &str,
) -> Outcome<Recipe>
where
    R: RecipeRepository + ?Sized,
{
    repository
        .get_by_id(ctx, id)
        .await
        .map_err(|err| map_repository_error(context, err))
}

/// Handles [`CreateRecipe`].
pub struct CreateRecipeHandler<R: ?Sized> {
    repository: Arc<R>,
    limits: RecipeLimits,
}

impl<R: ?Sized> CreateRecipeHandler<R> {
    /// Handler persisting through `repository`.
    pub fn new(repository: Arc<R>, limits: RecipeLimits) -> Self {
        Self { repository, limits }
    }
}

#[async_trait]
impl<R> RequestHandler<CreateRecipe> for CreateRecipeHandler<R>
where
    R: RecipeRepository + ?Sized,
{
    async fn handle(&self, ctx: &RequestContext, request: CreateRecipe) -> Outcome<RecipePayload> {
        check_draft(&self.limits, &request.draft)?;
        let recipe = Recipe::create(request.draft)?;

        self.repository
            .add(ctx, &recipe)
            .await
            .map_err(|err| map_repository_error("Error while creating the recipe", err))?;

        info!(recipe_id = %recipe.id(), "recipe created");
        Ok(RecipePayload::from(&recipe))
    }
}

/// Handles [`UpdateRecipe`].
pub struct UpdateRecipeHandler<R: ?Sized> {
    repository: Arc<R>,
    limits: RecipeLimits,
}

impl<R: ?Sized> UpdateRecipeHandler<R> {
    /// Handler persisting through `repository`.
    pub fn new(repository: Arc<R>, limits: RecipeLimits) -> Self {
        Self { repository, limits }
    }
}

#[async_trait]
impl<R> RequestHandler<UpdateRecipe> for UpdateRecipeHandler<R>
where
    R: RecipeRepository + ?Sized,
{
    async fn handle(&self, ctx: &RequestContext, request: UpdateRecipe) -> Outcome<()> {
        const CONTEXT: &str = "Error while updating the recipe";
        let UpdateRecipe { id, draft } = request;

        let mut recipe = load(self.repository.as_ref(), ctx, &id, CONTEXT).await?;
        check_draft(&self.limits, &draft)?;
        recipe.update(draft)?;

        self.repository
            .update(ctx, &recipe)
            .await
            .map_err(|err| map_repository_error(CONTEXT, err))?;

        info!(recipe_id = %id, "recipe updated");
        Ok(())
    }
}

/// Handles [`DeleteRecipe`].
pub struct DeleteRecipeHandler<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> DeleteRecipeHandler<R> {
    /// Handler persisting through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> RequestHandler<DeleteRecipe> for DeleteRecipeHandler<R>
where
    R: RecipeRepository + ?Sized,
{
    async fn handle(&self, ctx: &RequestContext, request: DeleteRecipe) -> Outcome<()> {
        const CONTEXT: &str = "Error while deleting the recipe";

        let recipe = load(self.repository.as_ref(), ctx, &request.id, CONTEXT).await?;
        self.repository
            .delete(ctx, &recipe)
            .await
            .map_err(|err| map_repository_error(CONTEXT, err))?;

        info!(recipe_id = %request.id, "recipe deleted");
        Ok(())
    }
}

/// Handles [`GetRecipeById`].
pub struct GetRecipeByIdHandler<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> GetRecipeByIdHandler<R> {
    /// Handler reading through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> RequestHandler<GetRecipeById> for GetRecipeByIdHandler<R>
where
    R: RecipeRepository + ?Sized,
{
    async fn handle(&self, ctx: &RequestContext, request: GetRecipeById) -> Outcome<RecipePayload> {
        let recipe = load(
            self.repository.as_ref(),
            ctx,
            &request.id,
            "Error while obtaining recipe by Id",
        )
        .await?;
        Ok(RecipePayload::from(&recipe))
    }
}

/// Handles [`GetAllRecipes`].
pub struct GetAllRecipesHandler<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> GetAllRecipesHandler<R> {
    /// Handler reading through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> RequestHandler<GetAllRecipes> for GetAllRecipesHandler<R>
where
    R: RecipeRepository + ?Sized,
{
    async fn handle(
        &self,
        ctx: &RequestContext,
        _request: GetAllRecipes,
    ) -> Outcome<Vec<RecipePayload>> {
        let recipes = self
            .repository
            .get_all(ctx)
            .await
            .map_err(|err| map_repository_error("Error while obtaining recipes", err))?;
        Ok(recipes.iter().map(RecipePayload::from).collect())
    }
}

/// Register the five recipe use cases over a shared repository.
///
/// # Errors
///
/// Returns [`DispatchError::DuplicateHandler`] when any recipe request is
/// already registered on `builder`.
pub fn register_recipe_handlers<R>(
    builder: &mut DispatcherBuilder,
    repository: Arc<R>,
    limits: RecipeLimits,
) -> Result<(), DispatchError>
where
    R: RecipeRepository + ?Sized + 'static,
{
    builder
        .register::<CreateRecipe, _>(CreateRecipeHandler::new(Arc::clone(&repository), limits))?
        .register::<UpdateRecipe, _>(UpdateRecipeHandler::new(Arc::clone(&repository), limits))?
        .register::<DeleteRecipe, _>(DeleteRecipeHandler::new(Arc::clone(&repository)))?
        .register::<GetRecipeById, _>(GetRecipeByIdHandler::new(Arc::clone(&repository)))?
        .register::<GetAllRecipes, _>(GetAllRecipesHandler::new(repository))?;
    Ok(())
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
