//! Stock named validators.
//!
//! Neither is registered by default; add them to a
//! [`HandlerRegistry`](crate::HandlerRegistry) under whatever `#validator`
//! name the schema uses.

use regex::Regex;
use serde_json::Value;

use crate::error::ValidationError;
use crate::path::JsonPath;
use crate::schema::{FieldValidator, SchemaNode};

/// Accepts only the exact string `"hello world"`.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{HandlerRegistry, HelloWorld, Validator};
/// use serde_json::json;
///
/// let registry = HandlerRegistry::new();
/// registry.register_validator("hello_world", HelloWorld).unwrap();
///
/// let mut validator = Validator::from_json(&json!({
///     "content": {"#type": "string", "#validator": "hello_world"}
/// }))
/// .unwrap()
/// .with_registry(registry);
///
/// assert!(validator.validate(&json!({"content": "hello world"})).is_ok());
/// assert!(validator.validate(&json!({"content": "goodbye"})).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloWorld;

impl FieldValidator for HelloWorld {
    fn validate(
        &self,
        value: &Value,
        _node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        if value.as_str() == Some("hello world") {
            Ok(())
        } else {
            Err(ValidationError::custom(
                path.clone(),
                "Hello world failed validation",
            ))
        }
    }
}

/// Requires a string value matching a regular expression.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{HandlerRegistry, PatternValidator};
///
/// let registry = HandlerRegistry::new();
/// registry
///     .register_validator("digits", PatternValidator::new(r"^\d+$").unwrap())
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PatternValidator {
    regex: Regex,
}

impl PatternValidator {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl FieldValidator for PatternValidator {
    fn validate(
        &self,
        value: &Value,
        _node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        let s = value.as_str().ok_or_else(|| {
            ValidationError::custom(path.clone(), "pattern check needs a string")
        })?;
        if self.regex.is_match(s) {
            Ok(())
        } else {
            Err(ValidationError::custom(
                path.clone(),
                format!("must match pattern '{}'", self.pattern()),
            ))
        }
    }
}
