//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (databases, caches). Each trait exposes strongly typed errors so adapters
//! map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod recipe_cache;
mod recipe_repository;

pub use cache_key::{RecipeCacheKey, RecipeCacheKeyValidationError};
#[cfg(test)]
pub use recipe_cache::MockRecipeCache;
pub use recipe_cache::{CachePolicy, RecipeCache, RecipeCacheError};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
