//! Extension points.
//!
//! [`ElementChecker`] adds new `#type` tags; [`FieldValidator`] implements a
//! `#validator` name. Both are registered by name in a
//! [`HandlerRegistry`](crate::HandlerRegistry) and looked up when data
//! reaches a field that uses them.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::node::SchemaNode;

/// Checks values of a custom `#type`.
///
/// The checker receives the traversal context, so it can hand nested
/// mappings back to the engine with [`ValidationContext::recurse`], the
/// mapping that encloses the field, the field's value, its schema node (raw
/// directives are available through [`SchemaNode::attribute`]) and its path.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{ElementChecker, JsonPath, SchemaNode, ValidationContext, ValidationError};
/// use serde_json::{Map, Value};
///
/// struct HexColor;
///
/// impl ElementChecker for HexColor {
///     fn check(
///         &self,
///         _cx: &mut ValidationContext<'_>,
///         _enclosing: &Map<String, Value>,
///         value: &Value,
///         _node: &SchemaNode,
///         path: &JsonPath,
///     ) -> Result<(), ValidationError> {
///         match value.as_str() {
///             Some(s) if s.len() == 7 && s.starts_with('#') => Ok(()),
///             _ => Err(ValidationError::type_mismatch(path.clone(), "not a hex color")),
///         }
///     }
/// }
/// ```
pub trait ElementChecker: Send + Sync {
    /// Validates one field value.
    fn check(
        &self,
        cx: &mut ValidationContext<'_>,
        enclosing: &Map<String, Value>,
        value: &Value,
        node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError>;
}

/// A named check run after a field's element check has passed.
///
/// Closures with the matching signature implement this trait:
///
/// ```rust
/// use jsonvalidator::{FieldValidator, JsonPath, SchemaNode, ValidationError};
/// use serde_json::Value;
///
/// let even = |value: &Value, _node: &SchemaNode, path: &JsonPath| {
///     match value.as_i64() {
///         Some(n) if n % 2 == 0 => Ok(()),
///         _ => Err(ValidationError::custom(path.clone(), "must be even")),
///     }
/// };
///
/// fn assert_validator<V: FieldValidator>(_: &V) {}
/// assert_validator(&even);
/// ```
pub trait FieldValidator: Send + Sync {
    /// Validates one field value. A returned error without a path is
    /// attributed to the field.
    fn validate(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError>;
}

impl<F> FieldValidator for F
where
    F: Fn(&Value, &SchemaNode, &JsonPath) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        self(value, node, path)
    }
}
