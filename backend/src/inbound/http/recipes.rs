//! Recipe HTTP handlers.
//!
//! ```text
//! GET    /api/recipes
//! GET    /api/recipes/{id}
//! POST   /api/recipes
//! PUT    /api/recipes/{id}
//! DELETE /api/recipes/{id}
//! ```
//!
//! Handlers translate HTTP into dispatcher requests and never touch the
//! repository directly.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{
    CreateRecipe, DeleteRecipe, Failure, GetAllRecipes, GetRecipeById, Outcome, RecipePayload,
    Request, UpdateRecipe,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ProblemDetails;
use crate::inbound::http::schemas::RecipeRequest;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_recipe_id;

/// Base path of the recipe collection.
pub const RECIPES_PATH: &str = "/api/recipes";

async fn send<R, T>(state: &HttpState, request: R) -> ApiResult<T>
where
    R: Request<Output = Outcome<T>>,
    T: Send + 'static,
{
    let ctx = state.request_context();
    state
        .dispatcher
        .dispatch(&ctx, request)
        .await
        .map_err(Failure::from)?
}

/// List every recipe.
#[utoipa::path(
    get,
    path = "/api/recipes",
    responses(
        (status = 200, description = "All recipes", body = [RecipePayload]),
        (status = 500, description = "Internal server error", body = ProblemDetails),
        (status = 503, description = "Storage unavailable", body = ProblemDetails)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecipePayload>>> {
    send(&state, GetAllRecipes).await.map(web::Json)
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    responses(
        (status = 200, description = "The recipe", body = RecipePayload),
        (status = 400, description = "Malformed identifier", body = ProblemDetails),
        (status = 404, description = "No such recipe", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipePayload>> {
    let id = parse_recipe_id(&path)?;
    send(&state, GetRecipeById { id }).await.map(web::Json)
}

/// Create a recipe.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipeRequest,
    responses(
        (
            status = 201,
            description = "Recipe created",
            headers(("Location" = String, description = "URL of the new recipe")),
            body = RecipePayload
        ),
        (status = 400, description = "Malformed body", body = ProblemDetails),
        (status = 422, description = "Validation failed", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into();
    let created = send(&state, CreateRecipe { draft }).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{RECIPES_PATH}/{}", created.id)))
        .json(created))
}

/// Replace every field of a recipe.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    request_body = RecipeRequest,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Malformed identifier or body", body = ProblemDetails),
        (status = 404, description = "No such recipe", body = ProblemDetails),
        (status = 422, description = "Validation failed", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_recipe_id(&path)?;
    let draft = payload.into_inner().into();
    send(&state, UpdateRecipe { id, draft }).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a recipe.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 400, description = "Malformed identifier", body = ProblemDetails),
        (status = 404, description = "No such recipe", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_recipe_id(&path)?;
    send(&state, DeleteRecipe { id }).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the recipe routes on an `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(get_recipe)
        .service(create_recipe)
        .service(update_recipe)
        .service(delete_recipe);
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
