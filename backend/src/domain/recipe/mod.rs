//! Recipe aggregate.
//!
//! A [`Recipe`] owns its field values; the only ways to obtain or change one
//! are the validated [`Recipe::create`], [`Recipe::update`] and
//! [`Recipe::restore`] operations. Validation reports every violated rule at
//! once, each as a 422 error tagged with the offending field.

mod limits;
mod payload;
mod validation;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Outcome;

pub use self::limits::RecipeLimits;
pub use self::payload::RecipePayload;
pub use self::validation::fields;

/// Stable recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for RecipeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Unvalidated recipe field values supplied by callers.
///
/// Times are in minutes and signed so negative input can be reported rather
/// than rejected during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeDraft {
    /// Recipe title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Preparation time in minutes.
    pub preparation_time: i32,
    /// Cooking time in minutes.
    pub cooking_time: i32,
    /// Number of servings.
    pub servings: i32,
    /// Ingredient lines in order.
    pub ingredients: Vec<String>,
    /// Instruction steps in order.
    pub instructions: Vec<String>,
}

impl RecipeDraft {
    /// Every invariant the draft violates, in field order.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::RecipeDraft;
    ///
    /// let violations = RecipeDraft::default().violations();
    /// assert_eq!(violations.len(), 7);
    /// ```
    #[must_use]
    pub fn violations(&self) -> Vec<crate::domain::Error> {
        validation::violations(self)
    }
}

/// Recipe aggregate root. Equality and hashing use the identifier only.
///
/// ## Invariants
/// - `title` and `description` are non-blank.
/// - Both times are non-negative and not both zero.
/// - `servings` is at least 1.
/// - `ingredients` and `instructions` are non-empty with no blank entries.
#[derive(Debug, Clone)]
pub struct Recipe {
    id: RecipeId,
    title: String,
    description: String,
    preparation_time: i32,
    cooking_time: i32,
    servings: i32,
    ingredients: Vec<String>,
    instructions: Vec<String>,
}

impl Recipe {
    /// Validate `draft` and create a recipe with a fresh identifier.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::{Recipe, RecipeDraft};
    ///
    /// let recipe = Recipe::create(RecipeDraft {
    ///     title: "Pancakes".to_owned(),
    ///     description: "Easy".to_owned(),
    ///     preparation_time: 10,
    ///     cooking_time: 20,
    ///     servings: 4,
    ///     ingredients: vec!["Eggs".to_owned(), "Flour".to_owned()],
    ///     instructions: vec!["Mix".to_owned(), "Bake".to_owned()],
    /// })
    /// .expect("valid recipe");
    /// assert_eq!(recipe.title(), "Pancakes");
    ///
    /// let failure = Recipe::create(RecipeDraft::default()).expect_err("invalid");
    /// assert_eq!(failure.errors().len(), 7);
    /// ```
    pub fn create(draft: RecipeDraft) -> Outcome<Self> {
        Self::restore(RecipeId::random(), draft)
    }

    /// Rebuild a stored recipe, re-checking every invariant.
    pub fn restore(id: RecipeId, draft: RecipeDraft) -> Outcome<Self> {
        validation::validate(&draft)?;
        let RecipeDraft {
            title,
            description,
            preparation_time,
            cooking_time,
            servings,
            ingredients,
            instructions,
        } = draft;
        Ok(Self {
            id,
            title,
            description,
            preparation_time,
            cooking_time,
            servings,
            ingredients,
            instructions,
        })
    }

    /// Replace every field with `draft`. On failure nothing changes.
    pub fn update(&mut self, draft: RecipeDraft) -> Outcome<()> {
        let updated = Self::restore(self.id, draft)?;
        *self = updated;
        Ok(())
    }

    /// Identifier assigned at creation.
    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    /// Recipe title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Preparation time in minutes.
    pub fn preparation_time(&self) -> i32 {
        self.preparation_time
    }

    /// Cooking time in minutes.
    pub fn cooking_time(&self) -> i32 {
        self.cooking_time
    }

    /// Number of servings.
    pub fn servings(&self) -> i32 {
        self.servings
    }

    /// Ingredient lines in order.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Instruction steps in order.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Copy the current field values into a draft.
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            preparation_time: self.preparation_time,
            cooking_time: self.cooking_time,
            servings: self.servings,
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
