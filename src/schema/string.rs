//! The `string` element.
//!
//! This module provides [`StringRule`], which accepts string values and
//! enforces inclusive `#min_length` / `#max_length` bounds.

use serde_json::Value;

use crate::error::ValidationError;
use crate::path::JsonPath;

use super::value_type_name;

/// Length bounds for a `string` node.
///
/// Lengths count Unicode scalar values, and both bounds are inclusive: a
/// string of exactly `max_len` characters passes.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{JsonPath, StringRule};
/// use serde_json::json;
///
/// let rule = StringRule::new().max_len(5);
/// let path = JsonPath::from_field("content");
///
/// assert!(rule.check(&json!("hello"), &path).is_ok());
/// assert!(rule.check(&json!("bananas"), &path).is_err());
/// assert!(rule.check(&json!(123), &path).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringRule {
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl StringRule {
    /// Creates a rule with no length bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive minimum length.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the inclusive maximum length.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// The `#min_length` bound, if set.
    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    /// The `#max_length` bound, if set.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Checks a value against this rule.
    ///
    /// Non-string values fail with a type mismatch; out-of-range lengths fail
    /// with a constraint violation. The maximum is checked first.
    pub fn check(&self, value: &Value, path: &JsonPath) -> Result<(), ValidationError> {
        let s = value.as_str().ok_or_else(|| {
            ValidationError::type_mismatch(
                path.clone(),
                format!("not a stringable ({})", value_type_name(value)),
            )
        })?;

        let len = s.chars().count();
        if let Some(max) = self.max_length {
            if len > max {
                return Err(ValidationError::constraint(
                    path.clone(),
                    format!(
                        "{} characters long and exceeds maximum length {}",
                        len, max
                    ),
                ));
            }
        }
        if let Some(min) = self.min_length {
            if len < min {
                return Err(ValidationError::constraint(
                    path.clone(),
                    format!("{} characters long and must be at least {} long", len, min),
                ));
            }
        }
        Ok(())
    }
}
