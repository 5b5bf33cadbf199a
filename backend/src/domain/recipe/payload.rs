//! Transport shape of a recipe.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Failure, Outcome};

use super::{Recipe, RecipeDraft, RecipeId};

/// Recipe as returned to callers and stored in the cache.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{Recipe, RecipeDraft, RecipePayload};
///
/// let recipe = Recipe::create(RecipeDraft {
///     title: "Soup".to_owned(),
///     description: "Warm".to_owned(),
///     preparation_time: 5,
///     cooking_time: 30,
///     servings: 2,
///     ingredients: vec!["Water".to_owned()],
///     instructions: vec!["Boil".to_owned()],
/// })
/// .expect("valid recipe");
/// let payload = RecipePayload::from(&recipe);
/// let json = serde_json::to_value(&payload).expect("serialisable");
/// assert_eq!(json["preparationTime"], 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    /// Recipe identifier.
    pub id: Uuid,
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
    pub ingredients: Vec<String>,
    /// Instruction steps in order.
    pub instructions: Vec<String>,
}

impl From<&Recipe> for RecipePayload {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: *recipe.id().as_uuid(),
            title: recipe.title().to_owned(),
            description: recipe.description().to_owned(),
            preparation_time: recipe.preparation_time(),
            cooking_time: recipe.cooking_time(),
            servings: recipe.servings(),
            ingredients: recipe.ingredients().to_vec(),
            instructions: recipe.instructions().to_vec(),
        }
    }
}

impl From<Recipe> for RecipePayload {
    fn from(recipe: Recipe) -> Self {
        Self::from(&recipe)
    }
}

impl TryFrom<RecipePayload> for Recipe {
    type Error = Failure;

    fn try_from(payload: RecipePayload) -> Outcome<Self> {
        let RecipePayload {
            id,
            title,
            description,
            preparation_time,
            cooking_time,
            servings,
            ingredients,
            instructions,
        } = payload;
        Self::restore(
            RecipeId::from_uuid(id),
            RecipeDraft {
                title,
                description,
                preparation_time,
                cooking_time,
                servings,
                ingredients,
                instructions,
            },
        )
    }
}
