//! Diesel and pool error mapping for the recipe repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RecipeRepositoryError;

use super::pool::PoolError;

/// Map pool errors to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(error.message())
}

/// Map Diesel errors to query or connection errors.
///
/// Database messages are logged at debug level and not passed on, so raw SQL
/// detail never reaches callers.
pub(crate) fn map_diesel_error(error: DieselError) -> RecipeRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RecipeRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecipeRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RecipeRepositoryError::query("recipe already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            RecipeRepositoryError::query("recipe violates a table constraint")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecipeRepositoryError::connection("database connection error")
        }
        DieselError::DeserializationError(_) => {
            RecipeRepositoryError::query("stored recipe could not be decoded")
        }
        _ => RecipeRepositoryError::query("database error"),
    }
}
