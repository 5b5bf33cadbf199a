//! Builders for the HTTP state: repository selection, cache decoration and
//! dispatcher registration.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use recipe_backend::domain::ports::RecipeRepository;
use recipe_backend::domain::{DispatchError, DispatcherBuilder, register_recipe_handlers};
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::cache::{CachedRecipeRepository, InMemoryRecipeCache};
use recipe_backend::outbound::persistence::{DieselRecipeRepository, InMemoryRecipeRepository};

use super::ServerConfig;

/// Pick the Diesel repository when a pool is configured, otherwise an
/// in-memory store that loses data on restart.
fn build_repository(config: &ServerConfig) -> Arc<dyn RecipeRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL recipe repository");
            Arc::new(DieselRecipeRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; recipes are kept in memory and lost on restart");
            Arc::new(InMemoryRecipeRepository::new())
        }
    }
}

/// Build the HTTP state over the cache-decorated repository.
///
/// # Errors
/// Propagates [`DispatchError::DuplicateHandler`] from handler registration.
pub(super) fn build_http_state(
    config: &ServerConfig,
    cache: Arc<InMemoryRecipeCache>,
) -> Result<web::Data<HttpState>, DispatchError> {
    let repository = Arc::new(CachedRecipeRepository::new(
        build_repository(config),
        cache,
        config.cache_policy,
    ));

    let mut builder = DispatcherBuilder::new();
    register_recipe_handlers(&mut builder, repository, config.limits)?;
    let state = HttpState::new(builder.build()).with_request_timeout(config.request_timeout);
    Ok(web::Data::new(state))
}
