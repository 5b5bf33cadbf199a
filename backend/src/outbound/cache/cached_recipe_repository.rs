//! Cache-aside decorator for any [`RecipeRepository`].
//!
//! Reads check the cache first and fill it on a miss. Successful writes drop
//! the list entry and the recipe's own entry; `add` also stores the new
//! recipe under its key. The cache is best-effort: every cache failure is
//! logged at warn level and the call continues against the repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::ports::{
    CachePolicy, RecipeCache, RecipeCacheKey, RecipeRepository, RecipeRepositoryError,
};
use crate::domain::{Recipe, RecipeId, RecipePayload, RequestContext};

/// Repository decorator serving reads from a [`RecipeCache`].
pub struct CachedRecipeRepository<R: ?Sized, C: ?Sized> {
    inner: Arc<R>,
    cache: Arc<C>,
    policy: CachePolicy,
}

impl<R: ?Sized, C: ?Sized> CachedRecipeRepository<R, C> {
    /// Wrap `inner`, caching reads in `cache` under `policy`.
    pub fn new(inner: Arc<R>, cache: Arc<C>, policy: CachePolicy) -> Self {
        Self {
            inner,
            cache,
            policy,
        }
    }

    /// Policy applied to every cache write.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }
}

impl<R, C> CachedRecipeRepository<R, C>
where
    R: RecipeRepository + ?Sized,
    C: RecipeCache + ?Sized,
{
    async fn read<T: DeserializeOwned>(&self, key: &RecipeCacheKey) -> Option<T> {
        let value = match self.cache.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(%key, "recipe cache miss");
                return None;
            }
            Err(error) => {
                warn!(%key, %error, "failed to read cache for {key}");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(decoded) => {
                debug!(%key, "recipe cache hit");
                Some(decoded)
            }
            Err(error) => {
                warn!(%key, %error, "discarding undecodable cache entry for {key}");
                self.invalidate(key).await;
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &RecipeCacheKey, value: &T) {
        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(%key, %error, "failed to encode cache entry for {key}");
                return;
            }
        };
        if let Err(error) = self.cache.set(key, encoded, self.policy).await {
            warn!(%key, %error, "failed to set cache for {key}");
        }
    }

    async fn invalidate(&self, key: &RecipeCacheKey) {
        if let Err(error) = self.cache.remove(key).await {
            warn!(%key, %error, "failed to remove cache for {key}");
        }
    }

    async fn invalidate_recipe(&self, id: &RecipeId) {
        self.invalidate(&RecipeCacheKey::all()).await;
        self.invalidate(&RecipeCacheKey::for_recipe(id)).await;
    }
}

fn restore_all(payloads: Vec<RecipePayload>) -> Option<Vec<Recipe>> {
    payloads
        .into_iter()
        .map(Recipe::try_from)
        .collect::<Result<Vec<_>, _>>()
        .ok()
}

#[async_trait]
impl<R, C> RecipeRepository for CachedRecipeRepository<R, C>
where
    R: RecipeRepository + ?Sized,
    C: RecipeCache + ?Sized,
{
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let key = RecipeCacheKey::all();
        if let Some(recipes) = self
            .read::<Vec<RecipePayload>>(&key)
            .await
            .and_then(restore_all)
        {
            return Ok(recipes);
        }

        let recipes = self.inner.get_all(ctx).await?;
        let payloads: Vec<RecipePayload> = recipes.iter().map(RecipePayload::from).collect();
        self.write(&key, &payloads).await;
        Ok(recipes)
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let key = RecipeCacheKey::for_recipe(id);
        if let Some(recipe) = self
            .read::<RecipePayload>(&key)
            .await
            .and_then(|payload| Recipe::try_from(payload).ok())
            .filter(|recipe| recipe.id() == id)
        {
            return Ok(recipe);
        }

        let recipe = self.inner.get_by_id(ctx, id).await?;
        self.write(&key, &RecipePayload::from(&recipe)).await;
        Ok(recipe)
    }

    async fn add(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        self.inner.add(ctx, recipe).await?;
        self.invalidate(&RecipeCacheKey::all()).await;
        self.write(&RecipeCacheKey::for_recipe(recipe.id()), &RecipePayload::from(recipe))
            .await;
        Ok(())
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        self.inner.update(ctx, recipe).await?;
        self.invalidate_recipe(recipe.id()).await;
        Ok(())
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        self.inner.delete(ctx, recipe).await?;
        self.invalidate_recipe(recipe.id()).await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "cached_recipe_repository_tests.rs"]
mod tests;
