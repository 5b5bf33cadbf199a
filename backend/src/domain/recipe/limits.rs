//! Size limits applied to incoming recipe data.
//!
//! The entity only enforces structural invariants; these bounds keep stored
//! rows and responses to a sensible size and are checked by the write
//! handlers before anything is persisted.

use crate::domain::Error;

use super::RecipeDraft;
use super::fields;

/// Upper bounds for recipe fields.
///
/// Times and servings bounds are exclusive; lengths are counted in
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeLimits {
    /// Maximum title length.
    pub max_title_chars: usize,
    /// Maximum description length.
    pub max_description_chars: usize,
    /// Exclusive bound on either time, in minutes.
    pub max_minutes: i32,
    /// Exclusive bound on servings.
    pub max_servings: i32,
    /// Maximum number of ingredient lines.
    pub max_ingredients: usize,
    /// Maximum number of instruction steps.
    pub max_instructions: usize,
}

impl Default for RecipeLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 200,
            max_description_chars: 1000,
            max_minutes: 1440,
            max_servings: 1000,
            max_ingredients: 50,
            max_instructions: 50,
        }
    }
}

impl RecipeLimits {
    /// Every limit the draft exceeds.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::{RecipeDraft, RecipeLimits};
    ///
    /// let draft = RecipeDraft {
    ///     servings: 5000,
    ///     ..RecipeDraft::default()
    /// };
    /// let errors = RecipeLimits::default().check(&draft);
    /// assert_eq!(errors.len(), 1);
    /// assert_eq!(errors[0].field(), Some("servings"));
    /// ```
    #[must_use]
    pub fn check(&self, draft: &RecipeDraft) -> Vec<Error> {
        let mut errors = Vec::new();

        if draft.title.chars().count() > self.max_title_chars {
            errors.push(Error::validation(
                fields::TITLE,
                format!("Title must not exceed {} characters", self.max_title_chars),
            ));
        }
        if draft.description.chars().count() > self.max_description_chars {
            errors.push(Error::validation(
                fields::DESCRIPTION,
                format!(
                    "Description must not exceed {} characters",
                    self.max_description_chars
                ),
            ));
        }
        if draft.preparation_time >= self.max_minutes {
            errors.push(Error::validation(
                fields::PREPARATION_TIME,
                format!("Preparation time must be less than {} minutes", self.max_minutes),
            ));
        }
        if draft.cooking_time >= self.max_minutes {
            errors.push(Error::validation(
                fields::COOKING_TIME,
                format!("Cooking time must be less than {} minutes", self.max_minutes),
            ));
        }
        if draft.servings >= self.max_servings {
            errors.push(Error::validation(
                fields::SERVINGS,
                format!("Servings must be less than {}", self.max_servings),
            ));
        }
        if draft.ingredients.len() > self.max_ingredients {
            errors.push(Error::validation(
                fields::INGREDIENTS,
                format!("At most {} ingredients are allowed", self.max_ingredients),
            ));
        }
        if draft.instructions.len() > self.max_instructions {
            errors.push(Error::validation(
                fields::INSTRUCTIONS,
                format!("At most {} instruction steps are allowed", self.max_instructions),
            ));
        }

        errors
    }
}
