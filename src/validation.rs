//! The traversal engine.
//!
//! This module provides [`ValidationContext`], which walks a data mapping
//! and a [`SchemaLevel`] in lockstep. At each level it first checks that
//! every `#required` field is present, then checks each data key in turn:
//! unknown keys fail, placeholders are skipped, the element check runs and
//! then the field's named validator, if any. The first failure ends the walk.

use serde_json::{Map, Value};

use crate::error::{ErrorKind, ValidationError};
use crate::path::JsonPath;
use crate::registry::HandlerRegistry;
use crate::schema::{check_boolean, Rule, SchemaLevel, SchemaNode};

/// State carried through one validation call.
///
/// The context tracks nesting depth, applies the strict/lenient policy for
/// unregistered handlers and collects non-fatal diagnostics. Custom
/// [`ElementChecker`](crate::ElementChecker)s receive it so they can hand
/// nested mappings back to [`recurse`](Self::recurse).
pub struct ValidationContext<'a> {
    registry: &'a HandlerRegistry,
    strict: bool,
    depth: usize,
    max_depth: usize,
    diagnostics: &'a mut Vec<String>,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context at depth zero.
    pub fn new(
        registry: &'a HandlerRegistry,
        strict: bool,
        max_depth: usize,
        diagnostics: &'a mut Vec<String>,
    ) -> Self {
        Self {
            registry,
            strict,
            depth: 0,
            max_depth,
            diagnostics,
        }
    }

    /// Number of mapping levels currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum allowed depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether unregistered handlers are fatal.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns the registry used for handler lookups.
    pub fn registry(&self) -> &HandlerRegistry {
        self.registry
    }

    /// Records a non-fatal diagnostic.
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(diagnostic = %message, "validation notice");
        self.diagnostics.push(message);
    }

    /// Validates `data` against `level`, with `path` naming where `data` sits.
    pub fn recurse(
        &mut self,
        data: &Value,
        level: &SchemaLevel,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        let map = data.as_object().ok_or_else(|| {
            ValidationError::type_mismatch(path.clone(), "not an associative array")
        })?;

        if self.depth >= self.max_depth {
            return Err(ValidationError::new(
                path.clone(),
                ErrorKind::DepthExceeded,
                format!("nesting exceeds maximum depth {}", self.max_depth),
            ));
        }

        tracing::trace!(path = %path, depth = self.depth, "entering level");
        self.depth += 1;
        let result = self.walk_level(map, level, path);
        self.depth -= 1;
        result
    }

    fn walk_level(
        &mut self,
        data: &Map<String, Value>,
        level: &SchemaLevel,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        if let Some((name, _)) = level
            .required_fields()
            .find(|(name, _)| !data.contains_key(*name))
        {
            return Err(ValidationError::new(
                path.push_field(name),
                ErrorKind::MissingRequiredField,
                "is a required key",
            ));
        }

        for (key, value) in data {
            let field_path = path.push_field(key.as_str());
            let node = level.get(key).ok_or_else(|| {
                ValidationError::new(field_path.clone(), ErrorKind::UnknownField, "is not known")
            })?;

            if matches!(node.rule(), Rule::Placeholder) {
                continue;
            }

            self.check_element(data, value, node, &field_path)
                .map_err(|e| e.located_at(&field_path))?;

            if let Some(name) = node.validator_name() {
                self.run_validator(name, value, node, &field_path)?;
            }
        }

        Ok(())
    }

    fn check_element(
        &mut self,
        enclosing: &Map<String, Value>,
        value: &Value,
        node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        match node.rule() {
            Rule::String(rule) => rule.check(value, path),
            Rule::Boolean => check_boolean(value, path),
            Rule::Integer(rule) => rule.check(value, path),
            Rule::Float(rule) => rule.check(value, path),
            Rule::Enum(rule) => rule.check(self, enclosing, value, path),
            Rule::Fieldset(level) => self.recurse(value, level, path),
            Rule::Placeholder => Ok(()),
            Rule::Extension(tag) => match self.registry.element(tag) {
                Some(checker) => checker.check(self, enclosing, value, node, path),
                None => self.unregistered(
                    ErrorKind::UnregisteredElement,
                    format!("No way to parse element {} for item {}", tag, path),
                    path,
                ),
            },
        }
    }

    fn run_validator(
        &mut self,
        name: &str,
        value: &Value,
        node: &SchemaNode,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        match self.registry.validator(name) {
            Some(validator) => validator
                .validate(value, node, path)
                .map_err(|e| e.located_at(path)),
            None => self.unregistered(
                ErrorKind::UnregisteredValidator,
                format!("No validator '{}' for item {}", name, path),
                path,
            ),
        }
    }

    fn unregistered(
        &mut self,
        kind: ErrorKind,
        message: String,
        path: &JsonPath,
    ) -> Result<(), ValidationError> {
        if self.strict {
            Err(ValidationError::new(path.clone(), kind, message))
        } else {
            self.note(message);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumRule, SchemaNode, StringRule};
    use serde_json::json;

    fn run(
        level: &SchemaLevel,
        data: &Value,
        strict: bool,
    ) -> (Result<(), ValidationError>, Vec<String>) {
        let registry = HandlerRegistry::new();
        let mut log = Vec::new();
        let result =
            ValidationContext::new(&registry, strict, 100, &mut log).recurse(data, level, &JsonPath::root());
        (result, log)
    }

    #[test]
    fn test_root_must_be_mapping() {
        let (result, _) = run(&SchemaLevel::new(), &json!([]), true);
        let error = result.unwrap_err();
        assert_eq!(error.kind, ErrorKind::TypeMismatch);
        assert!(error.path.is_root());
    }

    #[test]
    fn test_required_checked_before_field_errors() {
        let level = SchemaLevel::new()
            .field("bad", SchemaNode::boolean())
            .field("needed", SchemaNode::string().required());

        let (result, _) = run(&level, &json!({"bad": "not bool"}), true);
        let error = result.unwrap_err();
        assert_eq!(error.kind, ErrorKind::MissingRequiredField);
        assert_eq!(error.path.to_string(), "needed");
    }

    #[test]
    fn test_placeholder_is_skipped() {
        let level = SchemaLevel::new().field("later", SchemaNode::placeholder());
        let (result, _) = run(&level, &json!({"later": 42}), true);
        assert!(result.is_ok());
    }

    #[test]
    fn test_depth_limit() {
        let inner = SchemaLevel::new().field("leaf", SchemaNode::string());
        let level = SchemaLevel::new().field("nested", SchemaNode::new(inner));
        let data = json!({"nested": {"leaf": "x"}});

        let registry = HandlerRegistry::new();
        let mut log = Vec::new();
        let error = ValidationContext::new(&registry, true, 1, &mut log)
            .recurse(&data, &level, &JsonPath::root())
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::DepthExceeded);
        assert_eq!(error.path.to_string(), "nested");

        let mut log = Vec::new();
        assert!(ValidationContext::new(&registry, true, 2, &mut log)
            .recurse(&data, &level, &JsonPath::root())
            .is_ok());
    }

    #[test]
    fn test_depth_is_restored_after_nested_level() {
        let registry = HandlerRegistry::new();
        let mut log = Vec::new();
        let mut cx = ValidationContext::new(&registry, true, 100, &mut log);
        let level = SchemaLevel::new().field("f", SchemaNode::new(SchemaLevel::new()));

        cx.recurse(&json!({"f": {}}), &level, &JsonPath::root()).unwrap();
        assert_eq!(cx.depth(), 0);
    }

    #[test]
    fn test_lenient_unregistered_element_logs() {
        let level = SchemaLevel::new().field("c", SchemaNode::extension("color"));
        let (result, log) = run(&level, &json!({"c": "#fff"}), false);
        assert!(result.is_ok());
        assert_eq!(log, vec!["No way to parse element color for item c".to_string()]);
    }

    #[test]
    fn test_union_payload_path() {
        let level = SchemaLevel::new()
            .field(
                "type",
                SchemaNode::new(EnumRule::union().option(
                    "one",
                    SchemaLevel::new().field("sub", SchemaNode::new(StringRule::new().max_len(1))),
                )),
            )
            .field("one", SchemaNode::placeholder());

        let (result, _) = run(&level, &json!({"type": "one", "one": {"sub": "long"}}), true);
        let error = result.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ConstraintViolation);
        assert_eq!(error.path.to_string(), "one.sub");
    }
}
