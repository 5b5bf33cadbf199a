//! Recipe invariant checks.

use crate::domain::{Error, Failure, Outcome};

use super::RecipeDraft;

/// Field tags attached to recipe errors. They match the JSON property names
/// of the transport payload.
pub mod fields {
    /// Recipe identifier.
    pub const ID: &str = "id";
    /// Recipe title.
    pub const TITLE: &str = "title";
    /// Recipe description.
    pub const DESCRIPTION: &str = "description";
    /// Preparation time.
    pub const PREPARATION_TIME: &str = "preparationTime";
    /// Cooking time.
    pub const COOKING_TIME: &str = "cookingTime";
    /// Servings.
    pub const SERVINGS: &str = "servings";
    /// Ingredient list.
    pub const INGREDIENTS: &str = "ingredients";
    /// Instruction list.
    pub const INSTRUCTIONS: &str = "instructions";
}

const MIN_SERVINGS: i32 = 1;
const NO_TIME: &str = "At least one of preparation or cooking time must be greater than 0";

pub(super) fn validate(draft: &RecipeDraft) -> Outcome<()> {
    Failure::check(violations(draft))
}

pub(super) fn violations(draft: &RecipeDraft) -> Vec<Error> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(Error::validation(fields::TITLE, "Title is required"));
    }
    if draft.description.trim().is_empty() {
        errors.push(Error::validation(fields::DESCRIPTION, "Description is required"));
    }

    if draft.preparation_time < 0 {
        errors.push(Error::validation(
            fields::PREPARATION_TIME,
            "Preparation time cannot be negative",
        ));
    }
    if draft.cooking_time < 0 {
        errors.push(Error::validation(
            fields::COOKING_TIME,
            "Cooking time cannot be negative",
        ));
    }
    // One error per time field so each input carries its own tag; an
    // all-empty draft therefore reports seven errors.
    if draft.preparation_time == 0 && draft.cooking_time == 0 {
        errors.push(Error::validation(fields::PREPARATION_TIME, NO_TIME));
        errors.push(Error::validation(fields::COOKING_TIME, NO_TIME));
    }

    if draft.servings < MIN_SERVINGS {
        errors.push(Error::validation(
            fields::SERVINGS,
            format!("Servings must be at least {MIN_SERVINGS}"),
        ));
    }

    check_list(
        &mut errors,
        &draft.ingredients,
        fields::INGREDIENTS,
        "At least one ingredient is required",
        "Ingredients cannot be empty",
    );
    check_list(
        &mut errors,
        &draft.instructions,
        fields::INSTRUCTIONS,
        "At least one instruction step is required",
        "Instruction steps cannot be empty",
    );

    errors
}

fn check_list(
    errors: &mut Vec<Error>,
    items: &[String],
    field: &str,
    missing: &str,
    blank: &str,
) {
    if items.is_empty() {
        errors.push(Error::validation(field, missing));
    } else if items.iter().any(|item| item.trim().is_empty()) {
        errors.push(Error::validation(field, blank));
    }
}
