//! Value types for NEST properties.
//!
//! Values are the atomic data stored in node properties. NEST supports the
//! scalar types String, Int, Float, Bool, plus Null for an explicitly
//! cleared property. For uniqueness checking, present values are normalized
//! into the hashable [`IndexValue`] form; Null has no normalization because
//! absent values never collide with each other.

use crate::PropertyKeyId;
use std::fmt;

/// Property values keyed by property-name identifier.
pub type Properties = std::collections::HashMap<PropertyKeyId, Value>;

/// A value that can be stored in a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float if this is a Float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Hashable normalization of a present value, used as the key of uniqueness
/// lookups. Floats are keyed by their bit pattern so that no present value
/// is exempt from a uniqueness rule. Null has no normalization: an absent
/// property never collides with another absent property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexValue {
    Bool(bool),
    Int(i64),
    Float(u64),
    String(String),
}

impl IndexValue {
    /// Normalize a stored value. Returns None for Null.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(IndexValue::Bool(*b)),
            Value::Int(i) => Some(IndexValue::Int(*i)),
            Value::Float(f) => Some(IndexValue::Float(f.to_bits())),
            Value::String(s) => Some(IndexValue::String(s.clone())),
        }
    }
}

/// Build a property map from `raw_key => value` pairs.
#[macro_export]
macro_rules! props {
    () => {
        std::collections::HashMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = std::collections::HashMap::new();
            $(
                map.insert($crate::PropertyKeyId::new($key), $crate::Value::from($value));
            )+
            map
        }
    };
}
