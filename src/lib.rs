//! # jsonvalidator
//!
//! A recursive, schema-driven validator for nested JSON data.
//!
//! ## Overview
//!
//! A schema is a nested mapping whose `#`-prefixed keys are directives:
//! `#type` selects the element check, `#required` makes a field mandatory,
//! `#min_length`/`#max_length` and `#min_value`/`#max_value` bound values,
//! `#options` lists enum values or defines a discriminated union, and
//! `#validator` names a pluggable post-check. Data is walked in lockstep
//! with the schema; the first violation aborts the call with a
//! path-qualified [`ValidationError`].
//!
//! ## Core Types
//!
//! - [`Schema`]: The parsed, typed form of a raw schema document
//! - [`Validator`]: Runs validation and keeps the diagnostic log
//! - [`HandlerRegistry`]: Custom element types and named validators
//! - [`JsonPath`]: Field paths used in every error
//! - [`ValidationError`] / [`SchemaErrors`]: Data failures and schema problems
//!
//! ## Example
//!
//! ```rust
//! use jsonvalidator::{ErrorKind, Validator};
//! use serde_json::json;
//!
//! let mut validator = Validator::from_json(&json!({
//!     "type": {
//!         "#type": "enum",
//!         "#options": {
//!             "one": {"sub_one": {"#type": "string", "#required": true}},
//!             "two": {}
//!         }
//!     },
//!     "one": {"#type": "placeholder"},
//!     "two": {"#type": "placeholder"}
//! }))
//! .unwrap();
//!
//! assert!(validator.validate(&json!({"type": "one", "one": {"sub_one": "x"}})).is_ok());
//!
//! let error = validator.validate(&json!({"type": "one", "one": {}})).unwrap_err();
//! assert_eq!(error.kind, ErrorKind::MissingRequiredField);
//! assert_eq!(error.path.to_string(), "one.sub_one");
//!
//! let error = validator.validate(&json!({"type": "one"})).unwrap_err();
//! assert_eq!(error.kind, ErrorKind::MissingDependentKey);
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;
pub mod validator;
pub mod validators;

pub use error::{ErrorKind, SchemaError, SchemaErrors, ValidationError};
pub use path::JsonPath;
pub use registry::{HandlerKind, HandlerRegistry, RegistryError};
pub use schema::{
    ElementChecker, EnumOptions, EnumRule, FieldValidator, FloatRule, IntegerBound, IntegerRule,
    NumericRule, Rule, Schema, SchemaLevel, SchemaNode, StringRule,
};
pub use validation::ValidationContext;
pub use validator::{Validator, DEFAULT_MAX_DEPTH};
pub use validators::{HelloWorld, PatternValidator};

/// Result of validating one document.
pub type ValidationResult = Result<(), ValidationError>;
