//! HTTP adapter mapping for domain failures.
//!
//! Purpose: keep the domain error model HTTP-agnostic while allowing Actix
//! handlers to turn failures into problem payloads and status codes.
//!
//! Server faults (5xx) are redacted to their first message, which the domain
//! always sets to a generic description; the detail stays in the logs.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DispatchError, Error, ErrorCode, Failure, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Failure>;

/// One entry of a multi-error problem payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProblemEntry {
    /// Request field the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "title")]
    pub field: Option<String>,
    /// Human-readable message.
    #[schema(example = "Title is required")]
    pub detail: String,
}

/// Problem payload returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// Short summary of the failure class.
    #[schema(example = "Validation failed")]
    pub title: String,
    /// Message of the first error.
    #[schema(example = "Title is required")]
    pub detail: String,
    /// HTTP status code.
    #[schema(example = 422)]
    pub status: u16,
    /// Field tag of the first error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Every error, present when more than one was reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ProblemEntry>>,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

fn title_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Bad request",
        ErrorCode::NotFound => "Resource not found",
        ErrorCode::ValidationFailed => "Validation failed",
        ErrorCode::ServiceUnavailable => "Service unavailable",
        ErrorCode::InternalError => "Internal server error",
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    StatusCode::from_u16(code.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn entry(error: &Error) -> ProblemEntry {
    ProblemEntry {
        field: error.field().map(str::to_owned),
        detail: error.message().to_owned(),
    }
}

impl From<&Failure> for ProblemDetails {
    fn from(failure: &Failure) -> Self {
        let primary = failure.primary();
        let code = failure.code();
        let redact = code.is_server_fault();
        let errors = (!redact && failure.errors().len() > 1)
            .then(|| failure.errors().iter().map(entry).collect());
        Self {
            title: title_for(code).to_owned(),
            detail: primary.message().to_owned(),
            status: code.status(),
            field: if redact {
                None
            } else {
                primary.field().map(str::to_owned)
            },
            errors,
            trace_id: failure.trace_id().map(str::to_owned),
        }
    }
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code().is_server_fault() {
            error!(
                status = self.status(),
                trace_id = self.trace_id().unwrap_or_default(),
                failure = %self,
                "request failed"
            );
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder
            .content_type("application/problem+json")
            .json(ProblemDetails::from(self))
    }
}

impl From<DispatchError> for Failure {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Cancelled { .. } | DispatchError::TimedOut { .. } => {
                Failure::unavailable("The request did not complete in time", err)
            }
            DispatchError::MissingHandler { .. } | DispatchError::DuplicateHandler { .. } => {
                Failure::unexpected("Internal server error", err)
            }
        }
    }
}

impl From<actix_web::Error> for Failure {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain failure");
        Failure::new(Error::internal("Internal server error"))
    }
}
