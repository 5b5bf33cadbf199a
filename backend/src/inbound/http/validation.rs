//! Shared validation helpers for inbound HTTP adapters.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, Failure, RecipeId, recipe_fields};

/// Maximum accepted JSON body size in bytes.
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// Parse a recipe identifier from a path segment.
///
/// # Errors
/// Returns a 400 failure tagged with the `id` field when `value` is not a
/// UUID.
pub(crate) fn parse_recipe_id(value: &str) -> Result<RecipeId, Failure> {
    value.parse().map_err(|_| {
        Failure::new(
            Error::invalid_request("id must be a valid UUID")
                .with_field(recipe_fields::ID)
                .with_details(json!({ "value": value })),
        )
    })
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_owned(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body is too large".to_owned()
        }
        other => format!("Request body is not valid JSON: {other}"),
    };
    Failure::new(Error::invalid_request(message)).into()
}

/// JSON extractor configuration turning body errors into 400 problems.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(json_error_handler)
}
