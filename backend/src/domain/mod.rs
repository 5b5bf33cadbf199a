//! Domain primitives, aggregates and use cases.
//!
//! Purpose: hold the recipe aggregate, the failure model, the request
//! dispatcher and the ports the outbound adapters implement. Nothing in this
//! module depends on HTTP or a particular database.
//!
//! Public surface:
//! - `Recipe`, `RecipeDraft`, `RecipeId`, `RecipePayload`, `RecipeLimits`:
//!   the aggregate, its input bag, identifier, transport shape and size
//!   bounds.
//! - `Error`, `ErrorCode`, `Failure`, `Outcome`: failures as values.
//! - `Dispatcher`, `Request`, `RequestHandler`, `RequestContext`: typed
//!   request routing with cooperative cancellation.
//! - `recipe_service`: the five recipe use cases.

pub mod context;
pub mod dispatch;
pub mod error;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod trace_id;

pub use self::context::{Interrupted, RequestContext};
pub use self::dispatch::{DispatchError, Dispatcher, DispatcherBuilder, Request, RequestHandler};
pub use self::error::{Error, ErrorCode, ErrorValidationError, Failure, Outcome};
pub use self::recipe::{
    Recipe, RecipeDraft, RecipeId, RecipeLimits, RecipePayload, fields as recipe_fields,
};
pub use self::recipe_service::{
    CreateRecipe, DeleteRecipe, GetAllRecipes, GetRecipeById, UpdateRecipe,
    register_recipe_handlers,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
