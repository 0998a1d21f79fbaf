//! Field paths for locating values in nested data and schema documents.
//!
//! This module provides [`JsonPath`], the ordered sequence of field names
//! threaded through the traversal and reported in every error.

use std::fmt::{self, Display};

/// A path to a value in a nested mapping, e.g. `server.tls.cert`.
///
/// Paths are immutable: every builder method returns a new path and leaves
/// the original untouched, so a parent path can be shared between siblings.
///
/// # Example
///
/// ```rust
/// use jsonvalidator::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("server")
///     .push_field("tls");
///
/// assert_eq!(path.to_string(), "server.tls");
/// assert_eq!(path.sibling("plain").to_string(), "server.plain");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<String>,
}

impl JsonPath {
    /// Creates an empty path representing the root mapping.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field name.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Returns a new path with a field name appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Returns a new path whose last segment is replaced by `name`.
    ///
    /// This is how a discriminated union moves from the enum field to the
    /// payload field that sits next to it. On the root path this behaves
    /// like [`push_field`](Self::push_field).
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        segments.push(name.into());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the field names.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last field name, or None if this is root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
