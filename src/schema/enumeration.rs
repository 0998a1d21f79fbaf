//! The `enum` element and discriminated unions.
//!
//! An enum node either lists the literal values it accepts, or maps each
//! allowed value to a schema level. In the mapping form the chosen value
//! names a sibling field of the enum field, and that sibling is validated
//! against the option's level:
//!
//! ```text
//! schema: { "kind": { "#type": "enum", "#options": { "disk": { "size": {..} } } },
//!           "disk": { "#type": "placeholder" } }
//! data:   { "kind": "disk", "disk": { "size": 10 } }
//! ```

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, ValidationError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::node::SchemaLevel;
use super::numeric::IntegerBound;

/// The `#options` of an enum node.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumOptions {
    /// Literal values. Numbers match by value, so `1` matches `1.0`; other
    /// values use JSON equality.
    List(Vec<Value>),
    /// Discriminated union: option name to the level its payload must match.
    Union(IndexMap<String, SchemaLevel>),
    /// `#options` of any other JSON type, named here. Tolerated: the node is
    /// skipped with a diagnostic.
    Unsupported(String),
}

/// Options for an `enum` node.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{EnumRule, SchemaLevel, SchemaNode, StringRule};
///
/// let literal = EnumRule::list(["one", "two"]);
///
/// let union = EnumRule::union()
///     .option("one", SchemaLevel::new()
///         .field("sub_one", SchemaNode::new(StringRule::new().max_len(200)).required()))
///     .option("two", SchemaLevel::new());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumRule {
    options: EnumOptions,
}

impl EnumRule {
    /// An enum accepting exactly the given literal values.
    pub fn list<I, V>(options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            options: EnumOptions::List(options.into_iter().map(Into::into).collect()),
        }
    }

    /// An empty discriminated union; add branches with [`option`](Self::option).
    pub fn union() -> Self {
        Self {
            options: EnumOptions::Union(IndexMap::new()),
        }
    }

    pub(crate) fn from_options(options: EnumOptions) -> Self {
        Self { options }
    }

    /// Adds a union branch. A list-form rule is turned into a union first.
    pub fn option(mut self, name: impl Into<String>, level: SchemaLevel) -> Self {
        match &mut self.options {
            EnumOptions::Union(branches) => {
                branches.insert(name.into(), level);
            }
            _ => {
                let mut branches = IndexMap::new();
                branches.insert(name.into(), level);
                self.options = EnumOptions::Union(branches);
            }
        }
        self
    }

    /// The parsed `#options`.
    pub fn options(&self) -> &EnumOptions {
        &self.options
    }

    /// Checks `value`, re-entering the traversal for a chosen union branch.
    ///
    /// `enclosing` is the mapping that holds the enum field; the union
    /// payload is looked up there, under the chosen option's name.
    pub fn check(
        &self,
        cx: &mut ValidationContext<'_>,
        enclosing: &Map<String, Value>,
        value: &Value,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        match &self.options {
            EnumOptions::List(options) => {
                if options.iter().any(|option| same_option(option, value)) {
                    Ok(())
                } else {
                    Err(not_an_option(value, path))
                }
            }
            EnumOptions::Union(branches) => {
                let (chosen, level) = value
                    .as_str()
                    .and_then(|name| branches.get_key_value(name))
                    .ok_or_else(|| not_an_option(value, path))?;

                let payload_path = path.sibling(chosen.as_str());
                let payload = enclosing.get(chosen).ok_or_else(|| {
                    ValidationError::new(
                        payload_path.clone(),
                        ErrorKind::MissingDependentKey,
                        format!(
                            "is a required key when '{}' is set to option '{}'",
                            path, chosen
                        ),
                    )
                })?;

                tracing::trace!(option = %chosen, path = %payload_path, "following union option");
                cx.recurse(payload, level, &payload_path)
            }
            EnumOptions::Unsupported(shape) => {
                cx.note(format!(
                    "No way to parse element enum with type '{}'",
                    shape
                ));
                Ok(())
            }
        }
    }
}

fn same_option(option: &Value, value: &Value) -> bool {
    match (option, value) {
        (Value::Number(a), Value::Number(b)) => matches!(
            (IntegerBound::from_number(a), IntegerBound::from_number(b)),
            (Some(a), Some(b)) if a == b
        ),
        _ => option == value,
    }
}

fn not_an_option(value: &Value, path: &JsonPath) -> ValidationError {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    ValidationError::invalid_option(path.clone(), format!("'{}' is not a valid value", shown))
}
