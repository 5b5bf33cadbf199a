//! Request bodies accepted by the recipe endpoints.
//!
//! Every field defaults when omitted so a sparse body still reaches the
//! domain, which reports each missing value as its own validation error
//! instead of a single deserialisation failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RecipeDraft;

/// Body of `POST /api/recipes` and `PUT /api/recipes/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Recipe title.
    #[schema(example = "Pancakes")]
    pub title: String,
    /// Short description.
    #[schema(example = "Fluffy breakfast pancakes")]
    pub description: String,
    /// Preparation time in minutes.
    #[schema(example = 10)]
    pub preparation_time: i32,
    /// Cooking time in minutes.
    #[schema(example = 20)]
    pub cooking_time: i32,
    /// Number of servings.
    #[schema(example = 4)]
    pub servings: i32,
    /// Ingredient lines in order.
    #[schema(example = json!(["2 eggs", "200 g flour", "300 ml milk"]))]
    pub ingredients: Vec<String>,
    /// Instruction steps in order.
    #[schema(example = json!(["Whisk everything", "Fry in a hot pan"]))]
    pub instructions: Vec<String>,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(value: RecipeRequest) -> Self {
        let RecipeRequest {
            title,
            description,
            preparation_time,
            cooking_time,
            servings,
            ingredients,
            instructions,
        } = value;
        Self {
            title,
            description,
            preparation_time,
            cooking_time,
            servings,
            ingredients,
            instructions,
        }
    }
}
