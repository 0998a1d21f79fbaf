//! Raw schema parsing.
//!
//! Converts the `#`-directive mapping form into typed levels and nodes.
//! Every malformed node is reported, not just the first one.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::directive;
use super::enumeration::{EnumOptions, EnumRule};
use super::node::{Rule, SchemaLevel, SchemaNode};
use super::numeric::{IntegerBound, NumericRule};
use super::string::StringRule;
use super::value_type_name;

/// Parses a mapping of field names to node definitions.
///
/// `#`-prefixed keys are skipped, which is what lets a fieldset node's own
/// directives sit next to its child fields.
pub(crate) fn parse_level(raw: &Value, path: &JsonPath) -> Validation<SchemaLevel, SchemaErrors> {
    let map = match raw.as_object() {
        Some(map) => map,
        None => {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "schema level must be a mapping")
                    .with_code("invalid_level")
                    .with_expected("object")
                    .with_got(value_type_name(raw)),
            ))
        }
    };

    let mut errors = Vec::new();
    let mut level = SchemaLevel::new();

    for (name, definition) in map {
        if directive::is_directive(name) {
            continue;
        }
        match parse_node(definition, &path.push_field(name)) {
            Validation::Success(node) => level.insert(name.clone(), node),
            Validation::Failure(e) => errors.extend(e),
        }
    }

    if errors.is_empty() {
        Validation::Success(level)
    } else {
        Validation::Failure(SchemaErrors::from_vec(errors))
    }
}

fn parse_node(raw: &Value, path: &JsonPath) -> Validation<SchemaNode, SchemaErrors> {
    let map = match raw.as_object() {
        Some(map) => map,
        None => {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "field definition must be a mapping")
                    .with_code("invalid_field")
                    .with_expected("object")
                    .with_got(value_type_name(raw)),
            ))
        }
    };

    let mut errors = Vec::new();

    let tag = match map.get(directive::TYPE) {
        Some(Value::String(tag)) => Some(tag.as_str()),
        Some(other) => {
            errors.push(
                SchemaError::new(path.push_field(directive::TYPE), "#type must be a string")
                    .with_code("invalid_directive")
                    .with_got(value_type_name(other)),
            );
            None
        }
        None => {
            errors.push(
                SchemaError::new(path.clone(), "field definition has no #type")
                    .with_code("missing_type")
                    .with_expected("#type directive"),
            );
            None
        }
    };

    let validator = match map.get(directive::VALIDATOR) {
        Some(Value::String(name)) => Some(name.clone()),
        Some(other) => {
            errors.push(
                SchemaError::new(
                    path.push_field(directive::VALIDATOR),
                    "#validator must be a string",
                )
                .with_code("invalid_directive")
                .with_got(value_type_name(other)),
            );
            None
        }
        None => None,
    };

    let rule = tag.map(|tag| parse_rule(tag, raw, map, path, &mut errors));

    let attributes: Map<String, Value> = map
        .iter()
        .filter(|(key, _)| directive::is_directive(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    match rule {
        Some(rule) if errors.is_empty() => Validation::Success(SchemaNode::from_parts(
            rule,
            map.contains_key(directive::REQUIRED),
            validator,
            attributes,
        )),
        _ => Validation::Failure(SchemaErrors::from_vec(errors)),
    }
}

fn parse_rule(
    tag: &str,
    raw: &Value,
    map: &Map<String, Value>,
    path: &JsonPath,
    errors: &mut Vec<SchemaError>,
) -> Rule {
    match tag {
        "string" => {
            let mut rule = StringRule::new();
            if let Some(min) = bound(map, directive::MIN_LENGTH, path, errors, length_bound) {
                rule = rule.min_len(min);
            }
            if let Some(max) = bound(map, directive::MAX_LENGTH, path, errors, length_bound) {
                rule = rule.max_len(max);
            }
            Rule::String(rule)
        }
        "boolean" => Rule::Boolean,
        "integer" => Rule::Integer(numeric(map, path, errors, integer_bound)),
        "float" => Rule::Float(numeric(map, path, errors, float_bound)),
        "enum" => Rule::Enum(parse_enum(map, path, errors)),
        "fieldset" => match parse_level(raw, path) {
            Validation::Success(level) => Rule::Fieldset(level),
            Validation::Failure(e) => {
                errors.extend(e);
                Rule::Fieldset(SchemaLevel::new())
            }
        },
        "placeholder" => Rule::Placeholder,
        other => Rule::Extension(other.to_string()),
    }
}

fn parse_enum(map: &Map<String, Value>, path: &JsonPath, errors: &mut Vec<SchemaError>) -> EnumRule {
    let options = match map.get(directive::OPTIONS) {
        Some(Value::Array(items)) => EnumOptions::List(items.clone()),
        Some(Value::Object(branches)) => {
            let options_path = path.push_field(directive::OPTIONS);
            let mut levels = IndexMap::new();
            for (name, raw_level) in branches {
                match parse_level(raw_level, &options_path.push_field(name)) {
                    Validation::Success(level) => {
                        levels.insert(name.clone(), level);
                    }
                    Validation::Failure(e) => errors.extend(e),
                }
            }
            EnumOptions::Union(levels)
        }
        Some(other) => EnumOptions::Unsupported(value_type_name(other).to_string()),
        None => {
            errors.push(
                SchemaError::new(path.clone(), "enum definition has no #options")
                    .with_code("missing_options")
                    .with_expected("list or mapping of options"),
            );
            EnumOptions::List(Vec::new())
        }
    };
    EnumRule::from_options(options)
}

fn numeric<T>(
    map: &Map<String, Value>,
    path: &JsonPath,
    errors: &mut Vec<SchemaError>,
    extract: fn(&Value) -> Option<T>,
) -> NumericRule<T>
where
    T: Copy + PartialOrd + std::fmt::Display,
{
    let mut rule = NumericRule::new();
    if let Some(min) = bound(map, directive::MIN_VALUE, path, errors, extract) {
        rule = rule.min(min);
    }
    if let Some(max) = bound(map, directive::MAX_VALUE, path, errors, extract) {
        rule = rule.max(max);
    }
    rule
}

/// Reads an optional bound directive, recording an error if it is present
/// but unusable.
fn bound<T>(
    map: &Map<String, Value>,
    key: &str,
    path: &JsonPath,
    errors: &mut Vec<SchemaError>,
    extract: fn(&Value) -> Option<T>,
) -> Option<T> {
    let raw = map.get(key)?;
    match extract(raw) {
        Some(value) => Some(value),
        None => {
            errors.push(
                SchemaError::new(path.push_field(key), format!("{} is not a usable bound", key))
                    .with_code("invalid_bound")
                    .with_got(raw.to_string()),
            );
            None
        }
    }
}

fn length_bound(raw: &Value) -> Option<usize> {
    raw.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn integer_bound(raw: &Value) -> Option<IntegerBound> {
    match raw {
        Value::Number(n) => IntegerBound::from_number(n),
        _ => None,
    }
}

fn float_bound(raw: &Value) -> Option<f64> {
    raw.as_f64()
}
