//! Cache keys for recipe reads.
use thiserror::Error;

use crate::domain::RecipeId;

const ALL_RECIPES: &str = "recipes_all";
const RECIPE_PREFIX: &str = "recipe_";

/// Key under which a cached recipe read is stored.
///
/// # Examples
/// ```
/// use recipe_backend::domain::RecipeId;
/// use recipe_backend::domain::ports::RecipeCacheKey;
///
/// assert_eq!(RecipeCacheKey::all().as_str(), "recipes_all");
///
/// let id: RecipeId = "5f0c1d52-0000-4000-8000-000000000001".parse().expect("uuid");
/// assert_eq!(
///     RecipeCacheKey::for_recipe(&id).as_str(),
///     "recipe_5f0c1d52-0000-4000-8000-000000000001"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeCacheKey(String);

impl RecipeCacheKey {
    /// Key for the full recipe list.
    #[must_use]
    pub fn all() -> Self {
        Self(ALL_RECIPES.to_owned())
    }

    /// Key for a single recipe.
    #[must_use]
    pub fn for_recipe(id: &RecipeId) -> Self {
        Self(format!("{RECIPE_PREFIX}{id}"))
    }

    /// Construct a key after validating that it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, RecipeCacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RecipeCacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(RecipeCacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for RecipeCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RecipeCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`RecipeCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeCacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("recipe cache key must not be empty")]
    Empty,
    /// Key contains leading or trailing whitespace.
    #[error("recipe cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}

#[cfg(test)]
mod tests {
    //! Validates cache key formatting and whitespace constraints.
    use super::{RecipeCacheKey, RecipeCacheKeyValidationError};
    use crate::domain::RecipeId;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn cache_key_rejects_blank(#[case] value: &str) {
        let err = RecipeCacheKey::new(value).expect_err("blank keys rejected");
        assert_eq!(err, RecipeCacheKeyValidationError::Empty);
    }

    #[rstest]
    #[case(" leading")]
    #[case("trailing ")]
    fn cache_key_rejects_whitespace_padding(#[case] value: &str) {
        let err = RecipeCacheKey::new(value).expect_err("padded key rejected");
        assert_eq!(err, RecipeCacheKeyValidationError::ContainsWhitespace);
    }

    #[rstest]
    fn recipe_keys_are_distinct_per_id() {
        let first = RecipeCacheKey::for_recipe(&RecipeId::random());
        let second = RecipeCacheKey::for_recipe(&RecipeId::random());
        assert_ne!(first, second);
        assert_ne!(first, RecipeCacheKey::all());
        assert!(first.as_str().starts_with("recipe_"));
    }

    #[rstest]
    fn validated_key_matches_named_constructor() {
        let key = RecipeCacheKey::new("recipes_all").expect("valid key");
        assert_eq!(key, RecipeCacheKey::all());
        assert_eq!(key.to_string(), "recipes_all");
    }
}
