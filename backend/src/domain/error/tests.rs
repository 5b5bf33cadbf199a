//! Tests for the error and failure model.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn validation_errors() -> Vec<Error> {
    vec![
        Error::validation("title", "Title is required"),
        Error::validation("servings", "Servings must be at least 1"),
    ]
}

#[rstest]
#[case(ErrorCode::InvalidRequest, 400)]
#[case(ErrorCode::NotFound, 404)]
#[case(ErrorCode::ValidationFailed, 422)]
#[case(ErrorCode::ServiceUnavailable, 503)]
#[case(ErrorCode::InternalError, 500)]
fn codes_map_to_status(#[case] code: ErrorCode, #[case] status: u16) {
    assert_eq!(code.status(), status);
    assert_eq!(Error::new(code, "x").status(), status);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::NotFound, "");
    assert!(!err.message().trim().is_empty());
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
fn blank_field_tags_are_ignored() {
    let err = Error::internal("boom").with_field("  ");
    assert!(err.field().is_none());
}

#[rstest]
fn details_are_preserved() {
    let err = Error::invalid_request("bad").with_details(json!({"line": 3}));
    assert_eq!(err.details(), Some(&json!({"line": 3})));
}

#[rstest]
fn display_prefixes_field() {
    let err = Error::validation("title", "Title is required");
    assert_eq!(err.to_string(), "title: Title is required");
}

#[rstest]
fn check_accepts_empty_error_list() {
    assert!(Failure::check(Vec::new()).is_ok());
}

#[rstest]
fn check_keeps_every_error_in_order(validation_errors: Vec<Error>) {
    let failure = Failure::check(validation_errors.clone()).expect_err("errors present");
    assert_eq!(failure.errors(), validation_errors.as_slice());
    assert_eq!(failure.code(), ErrorCode::ValidationFailed);
    assert_eq!(failure.status(), 422);
}

#[rstest]
fn not_found_is_tagged_with_id() {
    let failure = Failure::not_found("Recipe with ID 1 was not found");
    assert_eq!(failure.status(), 404);
    assert_eq!(failure.primary().field(), Some("id"));
}

#[rstest]
fn unexpected_keeps_underlying_message() {
    let failure = Failure::unexpected("Error while deleting the recipe", "socket closed");
    let messages: Vec<_> = failure.errors().iter().map(Error::message).collect();
    assert_eq!(messages, ["Error while deleting the recipe", "socket closed"]);
    assert_eq!(failure.status(), 500);
}

#[rstest]
fn display_joins_messages(validation_errors: Vec<Error>) {
    let failure = Failure::check(validation_errors).expect_err("errors present");
    assert_eq!(
        failure.to_string(),
        "title: Title is required; servings: Servings must be at least 1"
    );
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    assert!(Failure::new(Error::internal("boom")).trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixture is a valid UUID");
    let failure = TraceId::scope(trace_id, async { Failure::new(Error::internal("boom")) }).await;
    assert_eq!(failure.trace_id(), Some(TRACE_ID));
}
