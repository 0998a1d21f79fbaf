//! The [`Validator`] entry point.

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;

use crate::error::{SchemaErrors, ValidationError};
use crate::path::JsonPath;
use crate::registry::HandlerRegistry;
use crate::schema::Schema;
use crate::validation::ValidationContext;

/// Default maximum number of nested mapping levels, root included.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Validates documents against one schema.
///
/// A validator pairs an immutable, shareable [`Schema`] with a
/// [`HandlerRegistry`], the handler policy and an append-only diagnostic
/// log. Each call to [`validate`](Self::validate) stops at the first
/// violation.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{ErrorKind, Validator};
/// use serde_json::json;
///
/// let mut validator = Validator::from_json(&json!({
///     "content": {"#type": "string", "#max_length": 5}
/// })).unwrap();
///
/// assert!(validator.validate(&json!({"content": "hello"})).is_ok());
///
/// let error = validator.validate(&json!({"content": "bananas"})).unwrap_err();
/// assert_eq!(error.kind, ErrorKind::ConstraintViolation);
/// assert_eq!(error.to_string(), "content: 7 characters long and exceeds maximum length 5");
/// ```
#[derive(Debug)]
pub struct Validator {
    schema: Arc<Schema>,
    registry: HandlerRegistry,
    strict_handlers: bool,
    max_depth: usize,
    diagnostics: Vec<String>,
}

impl Validator {
    /// Creates a strict validator with an empty handler registry.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
            registry: HandlerRegistry::new(),
            strict_handlers: true,
            max_depth: DEFAULT_MAX_DEPTH,
            diagnostics: Vec::new(),
        }
    }

    /// Parses a raw schema and creates a strict validator for it.
    ///
    /// # Errors
    ///
    /// Returns every problem found in the schema document.
    pub fn from_json(raw: &Value) -> Result<Self, SchemaErrors> {
        Schema::parse(raw).into_result().map(Self::new)
    }

    /// Chooses whether unregistered `#type` tags and `#validator` names fail
    /// validation (`true`, the default) or are logged and skipped.
    pub fn with_strict_handlers(mut self, strict: bool) -> Self {
        self.strict_handlers = strict;
        self
    }

    /// Sets the registry consulted for custom element types and validators.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the maximum number of nested mapping levels.
    ///
    /// The default is [`DEFAULT_MAX_DEPTH`]. Data nested deeper fails with
    /// [`ErrorKind::DepthExceeded`](crate::ErrorKind::DepthExceeded).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Creates a validator sharing this one's schema, registry and settings,
    /// with an empty diagnostic log.
    pub fn fork(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            registry: self.registry.clone(),
            strict_handlers: self.strict_handlers,
            max_depth: self.max_depth,
            diagnostics: Vec::new(),
        }
    }

    /// The schema this validator checks against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The handler registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Whether unregistered handlers are fatal.
    pub fn is_strict(&self) -> bool {
        self.strict_handlers
    }

    /// Validates one document.
    pub fn validate(&mut self, data: &Value) -> Result<(), ValidationError> {
        tracing::debug!(strict = self.strict_handlers, "validating document");
        let mut log = Vec::new();
        let result = self.run(data, &mut log);
        self.diagnostics.append(&mut log);
        result
    }

    /// Validates independent documents in parallel.
    ///
    /// Results come back in input order, and each document's diagnostics
    /// are appended to the log in that same order.
    pub fn validate_many(&mut self, documents: &[Value]) -> Vec<Result<(), ValidationError>> {
        tracing::debug!(count = documents.len(), "validating documents in parallel");
        let shared: &Self = self;
        let outcomes: Vec<_> = documents
            .par_iter()
            .map(|data| {
                let mut log = Vec::new();
                let result = shared.run(data, &mut log);
                (result, log)
            })
            .collect();

        outcomes
            .into_iter()
            .map(|(result, mut log)| {
                self.diagnostics.append(&mut log);
                result
            })
            .collect()
    }

    /// Non-fatal notices accumulated by every call on this instance.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    fn run(&self, data: &Value, log: &mut Vec<String>) -> Result<(), ValidationError> {
        ValidationContext::new(&self.registry, self.strict_handlers, self.max_depth, log)
            .recurse(data, self.schema.root(), &JsonPath::root())
    }
}

impl From<Schema> for Validator {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}
