//! Recipe read caching.
//!
//! - [`InMemoryRecipeCache`]: process-wide TTL + sliding expiry store.
//! - [`CachedRecipeRepository`]: cache-aside decorator over any recipe
//!   repository.
//!
//! Only a single in-process cache is supported; instances in other processes
//! may serve stale reads until their entries expire.

mod cached_recipe_repository;
mod memory_cache;

pub use cached_recipe_repository::CachedRecipeRepository;
pub use memory_cache::{InMemoryRecipeCache, run_purge_loop};
