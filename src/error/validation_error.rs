//! Data validation failures.
//!
//! Validation stops at the first violation, so a failed call yields exactly
//! one [`ValidationError`]: the location, the [`ErrorKind`], and a message.

use std::fmt::{self, Display};

use crate::path::JsonPath;

/// The category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A mapping was expected but something else was found, or a scalar has
    /// the wrong JSON type for its element.
    TypeMismatch,
    /// A field flagged `#required` is absent.
    MissingRequiredField,
    /// A data key has no schema entry at its level.
    UnknownField,
    /// A length or value bound was exceeded.
    ConstraintViolation,
    /// An enum value is not among the permitted options.
    InvalidOption,
    /// A union option was chosen but its payload field is absent.
    MissingDependentKey,
    /// No element checker is registered for a `#type` tag (strict mode).
    UnregisteredElement,
    /// No named validator is registered for a `#validator` name (strict mode).
    UnregisteredValidator,
    /// Raised by a pluggable checker or validator.
    Custom,
    /// Nesting went deeper than the configured maximum.
    DepthExceeded,
}

impl ErrorKind {
    /// Machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "invalid_type",
            ErrorKind::MissingRequiredField => "required",
            ErrorKind::UnknownField => "unknown_field",
            ErrorKind::ConstraintViolation => "constraint",
            ErrorKind::InvalidOption => "invalid_option",
            ErrorKind::MissingDependentKey => "missing_dependent_key",
            ErrorKind::UnregisteredElement => "unregistered_element",
            ErrorKind::UnregisteredValidator => "unregistered_validator",
            ErrorKind::Custom => "custom",
            ErrorKind::DepthExceeded => "max_depth_exceeded",
        }
    }

    /// Returns true for the two missing-handler kinds.
    pub fn is_unregistered_handler(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnregisteredElement | ErrorKind::UnregisteredValidator
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validation failure with its location.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{ErrorKind, JsonPath, ValidationError};
///
/// let error = ValidationError::new(
///     JsonPath::from_field("content"),
///     ErrorKind::ConstraintViolation,
///     "7 characters long and exceeds maximum length 5",
/// );
///
/// assert_eq!(
///     error.to_string(),
///     "content: 7 characters long and exceeds maximum length 5"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field the failure concerns.
    pub path: JsonPath,
    /// Category of the failure.
    pub kind: ErrorKind,
    /// Human-readable description, without the path.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(path: JsonPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// Creates a [`ErrorKind::Custom`] error, the usual return of a named
    /// validator.
    ///
    /// The path may be left as root; the engine fills in the field path.
    pub fn custom(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::Custom, message)
    }

    /// Creates a [`ErrorKind::TypeMismatch`] error.
    pub fn type_mismatch(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::TypeMismatch, message)
    }

    /// Creates a [`ErrorKind::ConstraintViolation`] error.
    pub fn constraint(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::ConstraintViolation, message)
    }

    /// Creates a [`ErrorKind::InvalidOption`] error.
    pub fn invalid_option(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::InvalidOption, message)
    }

    /// Returns the machine-readable code of this error's kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Stamps `path` onto an error that was raised without a location.
    pub(crate) fn located_at(mut self, path: &JsonPath) -> Self {
        if self.path.is_root() {
            self.path = path.clone();
        }
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};
