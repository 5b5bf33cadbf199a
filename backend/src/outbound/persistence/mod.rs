//! Recipe persistence adapters.
//!
//! - [`DieselRecipeRepository`]: PostgreSQL via Diesel with async support
//!   through `diesel-async` and `bb8` pooling. Rows and schema stay private
//!   to this module.
//! - [`InMemoryRecipeRepository`]: process-local store used when no database
//!   is configured and in tests.
//!
//! Both adapters run every call under the request context so a cancelled or
//! expired request abandons the storage work.
//!
//! # Example
//!
//! ```no_run
//! use recipe_backend::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), recipe_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let repo = DieselRecipeRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_recipe_repository;
mod memory_recipe_repository;
mod migrations;
mod models;
mod pool;
mod schema;

use std::future::Future;

use tracing::debug;

use crate::domain::RequestContext;
use crate::domain::ports::RecipeRepositoryError;

pub use diesel_recipe_repository::DieselRecipeRepository;
pub use memory_recipe_repository::InMemoryRecipeRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Run a storage operation under `ctx`, reporting interruption as
/// [`RecipeRepositoryError::Cancelled`].
async fn guarded<T, F>(ctx: &RequestContext, operation: F) -> Result<T, RecipeRepositoryError>
where
    F: Future<Output = Result<T, RecipeRepositoryError>>,
{
    match ctx.run(operation).await {
        Ok(result) => result,
        Err(interrupted) => {
            debug!(%interrupted, "storage call abandoned");
            Err(RecipeRepositoryError::cancelled())
        }
    }
}
