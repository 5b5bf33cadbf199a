//! Shared fixtures for the recipe integration suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use recipe_backend::Trace;
use recipe_backend::domain::ports::{
    CachePolicy, RecipeRepository, RecipeRepositoryError,
};
use recipe_backend::domain::{
    DispatcherBuilder, Recipe, RecipeId, RecipeLimits, RequestContext, register_recipe_handlers,
};
use recipe_backend::inbound::http::recipes;
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::inbound::http::validation::json_config;
use recipe_backend::outbound::cache::{CachedRecipeRepository, InMemoryRecipeCache};
use recipe_backend::outbound::persistence::InMemoryRecipeRepository;

/// In-memory repository counting every call that reaches it.
#[derive(Default)]
pub struct CountingRepository {
    inner: InMemoryRecipeRepository,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingRepository {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecipeRepository for CountingRepository {
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        self.read();
        self.inner.get_all(ctx).await
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
    ) -> Result<Recipe, RecipeRepositoryError> {
        self.read();
        self.inner.get_by_id(ctx, id).await
    }

    async fn add(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        self.write();
        self.inner.add(ctx, recipe).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        self.write();
        self.inner.update(ctx, recipe).await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        self.write();
        self.inner.delete(ctx, recipe).await
    }
}

/// HTTP state over `repository` decorated with a fresh in-memory cache.
pub fn cached_state(repository: Arc<CountingRepository>) -> HttpState {
    let cached = Arc::new(CachedRecipeRepository::new(
        repository,
        Arc::new(InMemoryRecipeCache::new()),
        CachePolicy::default(),
    ));
    let mut builder = DispatcherBuilder::new();
    register_recipe_handlers(&mut builder, cached, RecipeLimits::default())
        .expect("fresh builder accepts recipe handlers");
    HttpState::new(builder.build())
}

/// Application wired the same way as the server binary, minus Swagger UI.
pub fn recipe_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(recipes::configure))
}

/// Valid request body for `title`.
pub fn recipe_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A weeknight favourite",
        "preparationTime": 15,
        "cookingTime": 25,
        "servings": 2,
        "ingredients": ["Rice", "Stock", "Parmesan"],
        "instructions": ["Toast the rice", "Add stock slowly", "Stir in cheese"],
    })
}
