//! The `integer` and `float` elements.
//!
//! Both share [`NumericRule`], an inclusive min/max pair. The two elements
//! are strict about the JSON number's physical type: `integer` rejects
//! `5.0` and `float` rejects `5`. Bounds are not: an `integer` node may be
//! bounded by any JSON number, so `#max_value: 10.5` admits 10 but not 11.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::RangeInclusive;

use serde_json::{Number, Value};

use crate::error::ValidationError;
use crate::path::JsonPath;

/// Inclusive value bounds for a numeric node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRule<T> {
    min: Option<T>,
    max: Option<T>,
}

/// Bounds for an `integer` node.
pub type IntegerRule = NumericRule<IntegerBound>;

/// Bounds for a `float` node.
pub type FloatRule = NumericRule<f64>;

impl<T> Default for NumericRule<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: Copy + PartialOrd + Display> NumericRule<T> {
    /// Creates a rule with no bounds.
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Sets the inclusive minimum (`#min_value`).
    pub fn min(mut self, value: impl Into<T>) -> Self {
        self.min = Some(value.into());
        self
    }

    /// Sets the inclusive maximum (`#max_value`).
    pub fn max(mut self, value: impl Into<T>) -> Self {
        self.max = Some(value.into());
        self
    }

    /// Sets both bounds from an inclusive range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonvalidator::{IntegerRule, JsonPath};
    /// use serde_json::json;
    ///
    /// let rule = IntegerRule::new().range(-10000..=10000);
    ///
    /// assert!(rule.check(&json!(10000), &JsonPath::root()).is_ok());
    /// assert!(rule.check(&json!(10001), &JsonPath::root()).is_err());
    /// assert!(rule.check(&json!(1.5), &JsonPath::root()).is_err());
    /// ```
    pub fn range<U: Into<T> + Copy>(self, range: RangeInclusive<U>) -> Self {
        self.min(*range.start()).max(*range.end())
    }

    /// The minimum bound, if set.
    pub fn min_value(&self) -> Option<T> {
        self.min
    }

    /// The maximum bound, if set.
    pub fn max_value(&self) -> Option<T> {
        self.max
    }

    fn check_bounds(&self, n: T, path: &JsonPath) -> Result<(), ValidationError> {
        if let Some(max) = self.max {
            if n > max {
                return Err(too_large(max, path));
            }
        }
        if let Some(min) = self.min {
            if n < min {
                return Err(ValidationError::constraint(
                    path.clone(),
                    format!("value is smaller than {}", min),
                ));
            }
        }
        Ok(())
    }
}

impl NumericRule<IntegerBound> {
    /// Checks that `value` is a JSON integer within bounds.
    pub fn check(&self, value: &Value, path: &JsonPath) -> Result<(), ValidationError> {
        match value {
            Value::Number(n) if !n.is_f64() => match IntegerBound::from_number(n) {
                Some(bound) => self.check_bounds(bound, path),
                None => Err(not_a("an integer", path)),
            },
            _ => Err(not_a("an integer", path)),
        }
    }
}

impl NumericRule<f64> {
    /// Checks that `value` is a JSON float within bounds.
    pub fn check(&self, value: &Value, path: &JsonPath) -> Result<(), ValidationError> {
        match value {
            Value::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) => self.check_bounds(f, path),
                None => Err(not_a("a float", path)),
            },
            _ => Err(not_a("a float", path)),
        }
    }
}

/// A bound on an `integer` node: any JSON number.
///
/// Integers are held exactly (every `i64` and `u64` fits), and comparisons
/// between integers and floats are exact rather than going through `f64`.
///
/// ```rust
/// use jsonvalidator::IntegerBound;
///
/// assert!(IntegerBound::from(11) > IntegerBound::from(10.5));
/// assert!(IntegerBound::from(u64::MAX) > IntegerBound::from(i64::MAX));
/// assert_eq!(IntegerBound::from(100), IntegerBound::from(100.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum IntegerBound {
    /// A JSON integer.
    Int(i128),
    /// A JSON number with a fraction or exponent.
    Float(f64),
}

impl IntegerBound {
    /// Converts a JSON number, keeping integers exact.
    pub fn from_number(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Self::Int(i128::from(i)))
        } else if let Some(u) = n.as_u64() {
            Some(Self::Int(i128::from(u)))
        } else {
            n.as_f64().map(Self::Float)
        }
    }
}

impl From<i32> for IntegerBound {
    fn from(i: i32) -> Self {
        Self::Int(i128::from(i))
    }
}

impl From<i64> for IntegerBound {
    fn from(i: i64) -> Self {
        Self::Int(i128::from(i))
    }
}

impl From<u64> for IntegerBound {
    fn from(u: u64) -> Self {
        Self::Int(i128::from(u))
    }
}

impl From<f64> for IntegerBound {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl PartialEq for IntegerBound {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for IntegerBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(&b),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(a, b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
        }
    }
}

impl Display for IntegerBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

fn cmp_int_float(i: i128, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    let limit = 2f64.powi(127);
    if f >= limit {
        return Some(Ordering::Less);
    }
    if f < -limit {
        return Some(Ordering::Greater);
    }

    // |f| < 2^127, so its integral part converts to i128 exactly.
    let whole = f.trunc();
    match i.cmp(&(whole as i128)) {
        Ordering::Equal => whole.partial_cmp(&f),
        other => Some(other),
    }
}

fn too_large<T: Display>(max: T, path: &JsonPath) -> ValidationError {
    ValidationError::constraint(path.clone(), format!("value is larger than {}", max))
}

fn not_a(what: &str, path: &JsonPath) -> ValidationError {
    ValidationError::type_mismatch(path.clone(), format!("not {}", what))
}
