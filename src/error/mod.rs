//! Error types.
//!
//! [`SchemaError`]/[`SchemaErrors`] describe a malformed schema document and
//! are reported all at once when the schema is parsed. [`ValidationError`]
//! describes the first violation found in a data document.

mod schema_error;
mod validation_error;

pub use schema_error::{SchemaError, SchemaErrors};
pub use validation_error::{ErrorKind, ValidationError};
