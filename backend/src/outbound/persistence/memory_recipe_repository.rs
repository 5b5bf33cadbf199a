//! Process-local `RecipeRepository` implementation.
//!
//! Keeps recipes in insertion order behind an async read/write lock. Used
//! when no database URL is configured and by the integration tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Recipe, RecipeId, RequestContext};

use super::guarded;

/// In-memory implementation of the recipe repository port.
///
/// # Examples
/// ```
/// use recipe_backend::domain::ports::RecipeRepository;
/// use recipe_backend::domain::{Recipe, RecipeDraft, RequestContext};
/// use recipe_backend::outbound::persistence::InMemoryRecipeRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryRecipeRepository::new();
/// let recipe = Recipe::create(RecipeDraft {
///     title: "Toast".to_owned(),
///     description: "Bread, heated".to_owned(),
///     preparation_time: 1,
///     cooking_time: 3,
///     servings: 1,
///     ingredients: vec!["Bread".to_owned()],
///     instructions: vec!["Toast it".to_owned()],
/// })
/// .expect("valid recipe");
///
/// let ctx = RequestContext::new();
/// repo.add(&ctx, &recipe).await.expect("stored");
/// assert_eq!(repo.get_all(&ctx).await.expect("listed").len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with `recipes`, keeping their order.
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: RwLock::new(recipes.into_iter().collect()),
        }
    }

    fn position(recipes: &[Recipe], id: &RecipeId) -> Option<usize> {
        recipes.iter().position(|stored| stored.id() == id)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        guarded(ctx, async { Ok(self.recipes.read().await.clone()) }).await
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
    ) -> Result<Recipe, RecipeRepositoryError> {
        guarded(ctx, async {
            self.recipes
                .read()
                .await
                .iter()
                .find(|stored| stored.id() == id)
                .cloned()
                .ok_or_else(|| RecipeRepositoryError::not_found(*id))
        })
        .await
    }

    async fn add(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        guarded(ctx, async {
            let mut recipes = self.recipes.write().await;
            if Self::position(&recipes, recipe.id()).is_some() {
                return Err(RecipeRepositoryError::query("recipe already exists"));
            }
            recipes.push(recipe.clone());
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        guarded(ctx, async {
            let mut recipes = self.recipes.write().await;
            let slot = Self::position(&recipes, recipe.id())
                .and_then(|index| recipes.get_mut(index))
                .ok_or_else(|| RecipeRepositoryError::not_found(*recipe.id()))?;
            *slot = recipe.clone();
            Ok(())
        })
        .await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        guarded(ctx, async {
            let mut recipes = self.recipes.write().await;
            let index = Self::position(&recipes, recipe.id())
                .ok_or_else(|| RecipeRepositoryError::not_found(*recipe.id()))?;
            recipes.remove(index);
            Ok(())
        })
        .await
    }
}
