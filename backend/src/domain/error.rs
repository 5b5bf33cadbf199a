//! Domain-level failure model.
//!
//! Expected failures (validation, missing records, unavailable storage) are
//! returned as values rather than raised. A [`Failure`] carries an ordered,
//! non-empty list of [`Error`] entries so validation can report every
//! violated rule in one response. Inbound adapters map the failure onto their
//! own envelope; the HTTP adapter renders a problem payload.

use std::fmt;

use serde_json::Value;

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed and could not be interpreted.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request was understood but violates a domain rule.
    ValidationFailed,
    /// A dependency (storage, deadline) is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain or an adapter.
    InternalError,
}

impl ErrorCode {
    /// Status code attached to errors of this category.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationFailed.status(), 422);
    /// assert_eq!(ErrorCode::NotFound.status(), 404);
    /// ```
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::NotFound => 404,
            Self::ValidationFailed => 422,
            Self::ServiceUnavailable => 503,
            Self::InternalError => 500,
        }
    }

    /// Whether the category describes a server-side fault.
    #[must_use]
    pub const fn is_server_fault(self) -> bool {
        self.status() >= 500
    }

    /// Fallback message used when a caller supplies a blank one.
    const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "The request could not be processed",
            Self::NotFound => "The requested resource was not found",
            Self::ValidationFailed => "The request failed validation",
            Self::ServiceUnavailable => "The service is temporarily unavailable",
            Self::InternalError => "An unexpected error occurred",
        }
    }
}

/// A single error entry.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `field`, when present, is non-empty.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{Error, ErrorCode};
///
/// let err = Error::validation("title", "Title is required");
/// assert_eq!(err.code(), ErrorCode::ValidationFailed);
/// assert_eq!(err.field(), Some("title"));
/// assert_eq!(err.status(), 422);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    field: Option<String>,
    details: Option<Value>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The supplied message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error. Blank messages are replaced by a generic message
    /// for the category.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.default_message().to_owned(),
            field: None,
            details: None,
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            field: None,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Status code derived from [`Self::code`].
    pub fn status(&self) -> u16 {
        self.code.status()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field the error refers to, used by clients to highlight inputs.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Tag the error with the offending field. Blank tags are ignored.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !field.trim().is_empty() {
            self.field = Some(field);
        }
        self
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for a field-tagged
    /// [`ErrorCode::ValidationFailed`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_field(field)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

/// Failed outcome of a domain operation.
///
/// ## Invariants
/// - `errors` is never empty; the first entry decides [`Self::code`].
///
/// The trace identifier in scope at construction time is captured so adapters
/// can correlate the failure with request logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    errors: Vec<Error>,
    trace_id: Option<String>,
}

impl Failure {
    /// Failure carrying a single error.
    pub fn new(error: Error) -> Self {
        Self {
            errors: vec![error],
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Build a failure from accumulated errors, or `None` when nothing failed.
    pub fn from_errors(errors: Vec<Error>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self {
            errors,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Succeed when `errors` is empty, otherwise fail with all of them.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::{Error, Failure};
    ///
    /// assert!(Failure::check(Vec::new()).is_ok());
    ///
    /// let failure = Failure::check(vec![
    ///     Error::validation("title", "Title is required"),
    ///     Error::validation("servings", "Servings must be at least 1"),
    /// ])
    /// .expect_err("two violations");
    /// assert_eq!(failure.errors().len(), 2);
    /// ```
    pub fn check(errors: Vec<Error>) -> Outcome<()> {
        Self::from_errors(errors).map_or(Ok(()), Err)
    }

    /// Not-found failure tagged with the `id` field.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Error::not_found(message).with_field("id"))
    }

    /// Failure describing an unexpected infrastructure fault.
    ///
    /// The context message comes first, followed by the underlying cause so
    /// diagnostics keep the original message.
    pub fn unexpected(context: impl Into<String>, cause: impl fmt::Display) -> Self {
        let errors = vec![Error::internal(context), Error::internal(cause.to_string())];
        Self {
            errors,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Failure describing a dependency that is temporarily unavailable.
    pub fn unavailable(context: impl Into<String>, cause: impl fmt::Display) -> Self {
        let errors = vec![
            Error::service_unavailable(context),
            Error::service_unavailable(cause.to_string()),
        ];
        Self {
            errors,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// All errors in the order they were recorded.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// First recorded error.
    pub fn primary(&self) -> &Error {
        // `errors` is non-empty by construction.
        &self.errors[0]
    }

    /// Category of the failure.
    pub fn code(&self) -> ErrorCode {
        self.primary().code()
    }

    /// Status code of the failure.
    pub fn status(&self) -> u16 {
        self.code().status()
    }

    /// Trace identifier captured when the failure was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

/// Result of a domain operation: a value or a [`Failure`].
pub type Outcome<T> = Result<T, Failure>;

#[cfg(test)]
mod tests;
