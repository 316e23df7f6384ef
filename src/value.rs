//! Cell values and entity keys.
//!
//! Tables in rolejoin are dynamically typed: every cell holds a [`Value`].
//! Identifier cells are additionally projected to an [`EntityKey`] for
//! hash lookups during enrichment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Floats that convert to `i64` without saturating: `[-2^63, 2^63)`.
const I64_RANGE: std::ops::Range<f64> =
    -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;

/// A single table cell.
///
/// # Examples
///
/// ```
/// use rolejoin::Value;
///
/// let int_val = Value::Int(25);
/// let string_val = Value::String("Pikachu".to_string());
///
/// assert!(int_val.is_int());
/// assert!(string_val.is_string());
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or unmatched value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// Nested JSON (arrays and objects).
    Structured(serde_json::Value),
}

impl Value {
    /// True for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for [`Value::Bool`].
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// True for [`Value::Int`].
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// True for [`Value::Float`].
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// True for [`Value::String`].
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// The boolean, if this is a bool.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is an int.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value; ints widen to floats.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The text, if this is a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Projects this value to an entity key, if it can identify an entity.
    ///
    /// Integral floats collapse to integer keys so that `1.0` and `1` match,
    /// which is what JSON record stores routinely hand back.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_key(&self) -> Option<EntityKey> {
        match self {
            Self::Int(v) => Some(EntityKey::Int(*v)),
            // `as` saturates, so out-of-range floats must be rejected first.
            Self::Float(v) if v.fract() == 0.0 && I64_RANGE.contains(v) => {
                Some(EntityKey::Int(*v as i64))
            }
            Self::String(v) => Some(EntityKey::Str(v.clone())),
            _ => None,
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Structured(_) => "structured",
        }
    }

    /// Renders this value back to JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(v) => serde_json::Value::Bool(*v),
            Self::Int(v) => serde_json::Value::from(*v),
            Self::Float(v) => serde_json::Number::from_f64(*v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::String(v) => serde_json::Value::String(v.clone()),
            Self::Structured(v) => v.clone(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Structured(other)
            }
        }
    }
}

/// Hashable identifier used to match reference cells against entity rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    /// Numeric identifier (the common case, e.g. a catalogue number).
    Int(i64),
    /// Textual identifier.
    Str(String),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}
