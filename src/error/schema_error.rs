//! Schema definition error types.
//!
//! This module provides [`SchemaError`] for a single problem found while
//! parsing a raw schema document and [`SchemaErrors`] for reporting every
//! such problem at once.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single problem in a schema document.
///
/// `SchemaError` captures where in the schema the problem sits and what is
/// wrong with it:
/// - **path**: Location inside the schema document (directive keys included,
///   e.g. `kind.#options.one`)
/// - **message**: Human-readable description
/// - **got**: The offending value or JSON type (optional)
/// - **expected**: What the parser wanted instead (optional)
/// - **code**: Machine-readable error code such as `missing_type`
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{JsonPath, SchemaError};
///
/// let error = SchemaError::new(
///     JsonPath::root().push_field("content"),
///     "field definition has no #type"
/// )
/// .with_code("missing_type")
/// .with_expected("#type directive");
///
/// assert_eq!(error.code, "missing_type");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Location of the problem inside the schema document.
    pub path: JsonPath,
    /// Human-readable error message.
    pub message: String,
    /// The value that was found (formatted as string).
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code (e.g., `invalid_bound`).
    pub code: String,
}

impl SchemaError {
    /// Creates a new schema error with the given path and message.
    ///
    /// The error code defaults to "invalid_schema".
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "invalid_schema".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// A non-empty collection of schema definition errors.
///
/// Parsing never stops at the first malformed node, so a broken schema
/// document is reported in full. `SchemaErrors` implements `Semigroup`,
/// which is how the errors of sibling nodes are merged:
///
/// ```rust
/// use jsonvalidator::{JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let errors1 = SchemaErrors::single(
///     SchemaError::new(JsonPath::from_field("name"), "missing #type")
/// );
/// let errors2 = SchemaErrors::single(
///     SchemaError::new(JsonPath::from_field("age"), "bound is not a number")
/// );
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a `SchemaErrors` containing a single error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// Creates a `SchemaErrors` from a `Vec<SchemaError>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("SchemaErrors requires at least one error"))
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schema definition has {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_defaults() {
        let error = SchemaError::new(JsonPath::from_field("name"), "missing #type");

        assert_eq!(error.path, JsonPath::from_field("name"));
        assert_eq!(error.code, "invalid_schema");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
    }

    #[test]
    fn test_schema_error_display() {
        let error = SchemaError::new(JsonPath::from_field("count"), "bound is not a number")
            .with_code("invalid_bound")
            .with_expected("number")
            .with_got("string");

        let display = error.to_string();
        assert!(display.contains("count: bound is not a number"));
        assert!(display.contains("expected: number"));
        assert!(display.contains("got: string"));
    }

    #[test]
    fn test_schema_error_display_root() {
        let error = SchemaError::new(JsonPath::root(), "schema must be a mapping");
        assert!(error.to_string().starts_with("(root): "));
    }

    #[test]
    fn test_schema_errors_combine_and_filter() {
        let errors = SchemaErrors::single(
            SchemaError::new(JsonPath::from_field("a"), "1").with_code("missing_type"),
        )
        .combine(SchemaErrors::single(
            SchemaError::new(JsonPath::from_field("b"), "2").with_code("invalid_bound"),
        ))
        .combine(SchemaErrors::single(
            SchemaError::new(JsonPath::from_field("c"), "3").with_code("missing_type"),
        ));

        assert_eq!(errors.len(), 3);
        assert!(!errors.is_empty());
        assert_eq!(errors.with_code("missing_type").len(), 2);
        assert_eq!(errors.first().message, "1");
    }

    #[test]
    fn test_schema_errors_display() {
        let errors = SchemaErrors::from_vec(vec![
            SchemaError::new(JsonPath::from_field("name"), "missing #type"),
            SchemaError::new(JsonPath::from_field("age"), "bad bound"),
        ]);
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("name: missing #type"));
        assert!(display.contains("age: bad bound"));
    }
}
