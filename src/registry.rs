//! Handler registry for custom element types and named validators.
//!
//! This module provides [`HandlerRegistry`], the table the traversal
//! consults when a field uses a `#type` tag outside the built-in set or a
//! `#validator` name.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::schema::{ElementChecker, FieldValidator, BUILTIN_TAGS};

/// Type alias for a handler storage map.
type HandlerMap<T> = Arc<RwLock<HashMap<String, Arc<T>>>>;

/// A thread-safe registry of element checkers and named validators.
///
/// Handlers are resolved by name each time data reaches a field that needs
/// one, so handlers registered after a [`Validator`](crate::Validator) was
/// built still take part.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` storage. Clones share the same
/// tables: registering through one clone is visible through all of them.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::{HandlerRegistry, HelloWorld};
///
/// let registry = HandlerRegistry::new();
/// registry.register_validator("hello_world", HelloWorld).unwrap();
///
/// assert!(registry.validator("hello_world").is_some());
/// assert!(registry.validator("missing").is_none());
///
/// // Duplicate registration fails
/// assert!(registry.register_validator("hello_world", HelloWorld).is_err());
/// ```
pub struct HandlerRegistry {
    elements: HandlerMap<dyn ElementChecker>,
    validators: HandlerMap<dyn FieldValidator>,
}

impl HandlerRegistry {
    /// Creates a registry with no handlers.
    pub fn new() -> Self {
        Self {
            elements: Arc::new(RwLock::new(HashMap::new())),
            validators: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers an element checker for a custom `#type` tag.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ReservedTag` for a built-in tag and
    /// `RegistryError::DuplicateName` if the tag is already registered.
    pub fn register_element<C>(&self, tag: impl Into<String>, checker: C) -> Result<(), RegistryError>
    where
        C: ElementChecker + 'static,
    {
        let tag = tag.into();
        if BUILTIN_TAGS.contains(&tag.as_str()) {
            return Err(RegistryError::ReservedTag(tag));
        }

        let mut elements = self.elements.write();
        if elements.contains_key(&tag) {
            return Err(RegistryError::DuplicateName {
                kind: HandlerKind::Element,
                name: tag,
            });
        }

        elements.insert(tag, Arc::new(checker));
        Ok(())
    }

    /// Registers a named validator for use with `#validator`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register_validator<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: FieldValidator + 'static,
    {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName {
                kind: HandlerKind::Validator,
                name,
            });
        }

        validators.insert(name, Arc::new(validator));
        Ok(())
    }

    /// Looks up the element checker for a tag.
    pub fn element(&self, tag: &str) -> Option<Arc<dyn ElementChecker>> {
        self.elements.read().get(tag).cloned()
    }

    /// Looks up a named validator.
    pub fn validator(&self, name: &str) -> Option<Arc<dyn FieldValidator>> {
        self.validators.read().get(name).cloned()
    }

    /// Registered element tags, sorted.
    pub fn element_tags(&self) -> Vec<String> {
        sorted_keys(&self.elements)
    }

    /// Registered validator names, sorted.
    pub fn validator_names(&self) -> Vec<String> {
        sorted_keys(&self.validators)
    }
}

fn sorted_keys<T: ?Sized>(map: &HandlerMap<T>) -> Vec<String> {
    let mut names: Vec<String> = map.read().keys().cloned().collect();
    names.sort();
    names
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HandlerRegistry {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
            validators: Arc::clone(&self.validators),
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("elements", &self.element_tags())
            .field("validators", &self.validator_names())
            .finish()
    }
}

/// Which table a handler lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// A `#type` element checker.
    Element,
    /// A `#validator` post-check.
    Validator,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Element => f.write_str("element checker"),
            HandlerKind::Validator => f.write_str("validator"),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a handler under a name that already exists.
    #[error("{kind} '{name}' already registered")]
    DuplicateName {
        /// Table the name collided in.
        kind: HandlerKind,
        /// The duplicated name.
        name: String,
    },

    /// Attempted to register an element checker for a built-in tag.
    #[error("'{0}' is a built-in element type")]
    ReservedTag(String),
}
