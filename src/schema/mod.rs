//! Schema model.
//!
//! A schema arrives as a nested mapping in which `#`-prefixed keys are
//! directives and every other key is a field name:
//!
//! ```text
//! {
//!   "title":   { "#type": "string", "#max_length": 80, "#required": true },
//!   "options": { "#type": "fieldset", "#collapsible": true,
//!                "public": { "#type": "boolean" } }
//! }
//! ```
//!
//! [`Schema::parse`] turns that form into typed [`SchemaLevel`]s and
//! [`SchemaNode`]s once, reporting every malformed node together.
//!
//! # Example
//!
//! ```rust
//! use jsonvalidator::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::parse(&json!({
//!     "content": {"#type": "string", "#max_length": 5}
//! }));
//! assert!(schema.is_success());
//!
//! let broken = Schema::parse(&json!({
//!     "content": {"#max_length": 5},
//!     "count": {"#type": "integer", "#max_value": "many"}
//! }));
//! assert_eq!(broken.into_result().unwrap_err().len(), 2);
//! ```

mod enumeration;
mod node;
mod numeric;
mod parse;
mod string;
mod traits;

use std::str::FromStr;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors, ValidationError};
use crate::path::JsonPath;

pub use enumeration::{EnumOptions, EnumRule};
pub use node::{Rule, SchemaLevel, SchemaNode};
pub use numeric::{FloatRule, IntegerBound, IntegerRule, NumericRule};
pub use string::StringRule;
pub use traits::{ElementChecker, FieldValidator};

/// Reserved directive keys.
pub mod directive {
    /// Marks a key as a directive rather than a field name.
    pub const PREFIX: char = '#';
    /// Element type tag.
    pub const TYPE: &str = "#type";
    /// Presence makes the field mandatory.
    pub const REQUIRED: &str = "#required";
    /// Inclusive maximum string length.
    pub const MAX_LENGTH: &str = "#max_length";
    /// Inclusive minimum string length.
    pub const MIN_LENGTH: &str = "#min_length";
    /// Inclusive maximum numeric value.
    pub const MAX_VALUE: &str = "#max_value";
    /// Inclusive minimum numeric value.
    pub const MIN_VALUE: &str = "#min_value";
    /// Enum option list or union branches.
    pub const OPTIONS: &str = "#options";
    /// Name of a post-validator.
    pub const VALIDATOR: &str = "#validator";

    /// Returns true for `#`-prefixed keys.
    pub fn is_directive(key: &str) -> bool {
        key.starts_with(PREFIX)
    }
}

/// `#type` tags handled by the engine itself.
pub const BUILTIN_TAGS: [&str; 7] = [
    "string",
    "boolean",
    "integer",
    "float",
    "enum",
    "fieldset",
    "placeholder",
];

/// A parsed schema: the root level of field definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    root: SchemaLevel,
}

impl Schema {
    /// Parses a raw schema mapping.
    ///
    /// All problems in the document are accumulated into the failure.
    pub fn parse(raw: &Value) -> Validation<Schema, SchemaErrors> {
        match parse::parse_level(raw, &JsonPath::root()) {
            Validation::Success(root) => Validation::Success(Schema { root }),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// The top-level field definitions.
    pub fn root(&self) -> &SchemaLevel {
        &self.root
    }
}

impl From<SchemaLevel> for Schema {
    fn from(root: SchemaLevel) -> Self {
        Self { root }
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaErrors;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        Schema::parse(raw).into_result()
    }
}

impl FromStr for Schema {
    type Err = SchemaErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: Value = serde_json::from_str(s).map_err(|e| {
            SchemaErrors::single(
                SchemaError::new(JsonPath::root(), format!("schema is not valid JSON: {}", e))
                    .with_code("invalid_json"),
            )
        })?;
        Schema::try_from(&raw)
    }
}

/// Checks the `boolean` element: only the JSON literals `true` and `false`.
pub(crate) fn check_boolean(value: &Value, path: &JsonPath) -> Result<(), ValidationError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(ValidationError::type_mismatch(path.clone(), "not a boolean"))
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_accepts_only_literals() {
        let path = JsonPath::root();
        assert!(check_boolean(&json!(true), &path).is_ok());
        assert!(check_boolean(&json!(false), &path).is_ok());
        for value in [json!(0), json!(1), json!("true"), json!("false"), json!(null)] {
            assert!(check_boolean(&value, &path).is_err());
        }
    }

    #[test]
    fn test_from_str_parses_json() {
        let schema: Schema = r##"{"content": {"#type": "string"}}"##.parse().unwrap();
        assert!(schema.root().contains("content"));
    }

    #[test]
    fn test_from_str_reports_bad_json() {
        let errors = "{not json".parse::<Schema>().unwrap_err();
        assert_eq!(errors.first().code, "invalid_json");
    }

    #[test]
    fn test_directive_detection() {
        assert!(directive::is_directive("#type"));
        assert!(!directive::is_directive("type"));
    }

    #[test]
    fn test_builtin_tags_match_rule_tags() {
        let rules = [
            Rule::String(StringRule::new()),
            Rule::Boolean,
            Rule::Integer(IntegerRule::new()),
            Rule::Float(FloatRule::new()),
            Rule::Enum(EnumRule::list(Vec::<Value>::new())),
            Rule::Fieldset(SchemaLevel::new()),
            Rule::Placeholder,
        ];
        let tags: Vec<_> = rules.iter().map(Rule::tag).collect();
        assert_eq!(tags, BUILTIN_TAGS.to_vec());
    }
}
