//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic raw value read from a host record.
///
/// This is what a record's `getValue` accessor hands back. The grid only ever
/// looks at it twice: as the display fallback when no formatted value exists,
/// and as the numeric priority when ordering records.
///
/// # Example
///
/// ```
/// use priority_grid::model::Value;
///
/// let name = Value::from("Contoso");
/// let order = Value::from(3);
/// let empty = Value::Null;
///
/// assert_eq!(name.display().as_deref(), Some("Contoso"));
/// assert_eq!(order.as_priority(), Some(3.0));
/// assert_eq!(empty.display(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Fallback for unrecognized JSON values.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// Renders the raw value as a display string.
    ///
    /// Returns `None` for null, which callers treat as "no value".
    pub fn display(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Long(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Guid(g) => Some(g.to_string()),
            Value::DateTime(dt) => Some(dt.to_rfc3339()),
            Value::Json(serde_json::Value::Null) => None,
            Value::Json(serde_json::Value::String(s)) => Some(s.clone()),
            Value::Json(other) => Some(other.to_string()),
        }
    }

    /// Interprets the value as a numeric priority.
    ///
    /// Numbers and numeric strings qualify; everything else is `None`.
    pub fn as_priority(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) if n.is_finite() => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_numbers_and_strings() {
        assert_eq!(Value::Int(4).as_priority(), Some(4.0));
        assert_eq!(Value::Long(9).as_priority(), Some(9.0));
        assert_eq!(Value::Decimal(Decimal::new(25, 1)).as_priority(), Some(2.5));
        assert_eq!(Value::from(" 7 ").as_priority(), Some(7.0));
        assert_eq!(Value::from("seven").as_priority(), None);
        assert_eq!(Value::Float(f64::NAN).as_priority(), None);
        assert_eq!(Value::Null.as_priority(), None);
    }

    #[test]
    fn test_display_null_is_absent() {
        assert_eq!(Value::Null.display(), None);
        assert_eq!(Value::Json(serde_json::Value::Null).display(), None);
        assert_eq!(Value::Bool(true).display().as_deref(), Some("true"));
    }
}
