//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the recipe CRUD endpoints and the health probes
//! - **Schemas**: [`RecipePayload`], [`RecipeRequest`] and the problem payload
//!   ([`ProblemDetails`], [`ProblemEntry`]) returned on failure
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::RecipePayload;
use crate::inbound::http::error::{ProblemDetails, ProblemEntry};
use crate::inbound::http::schemas::RecipeRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe backend API",
        description = "Create, read, update and delete recipes.",
        license(name = "MIT", url = "https://opensource.org/license/mit")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(RecipePayload, RecipeRequest, ProblemDetails, ProblemEntry)),
    tags(
        (name = "recipes", description = "Recipe management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
