//! OData wire format for Record.
//!
//! ## Write Format (Serialization)
//!
//! Update bodies carry only the changed fields: `"sort_order": 3`.
//! Null values are skipped.
//!
//! ## Read Format (Deserialization)
//!
//! - Formatted values: `"field@OData.Community.Display.V1.FormattedValue": "Display Text"`
//! - Lookup fields: `"_ownerid_value": "guid"` (exposed as `ownerid`)
//! - Non-integer numbers: read as `Decimal`, falling back to `Float`
//!   when the literal does not fit (exponents, very large magnitudes)
//! - Other `@odata.*` / `@Microsoft.*` annotations, the ETag included, are dropped.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Record;
use super::Value;

const FORMATTED_VALUE: &str = "@OData.Community.Display.V1.FormattedValue";

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        for (key, value) in &self.fields {
            // Dataverse ignores nulls in update bodies
            if !value.is_null() {
                map.serialize_entry(key, value)?;
            }
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a Dataverse record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        let mut formatted_values: HashMap<String, String> = HashMap::new();
        let mut raw_fields: HashMap<String, serde_json::Value> = HashMap::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            if let Some(field_name) = key.strip_suffix(FORMATTED_VALUE) {
                if let serde_json::Value::String(s) = value {
                    formatted_values.insert(clean_field_name(field_name), s);
                }
            } else if key.contains('@') {
                // Skip other OData annotations
            } else {
                raw_fields.insert(clean_field_name(&key), value);
            }
        }

        for (key, json_value) in raw_fields {
            record.fields.insert(key, json_value_to_value(json_value));
        }
        record.formatted_values = formatted_values;

        Ok(record)
    }
}

/// Maps the lookup wire name `_field_value` to `field`.
fn clean_field_name(key: &str) -> String {
    key.strip_prefix('_')
        .and_then(|k| k.strip_suffix("_value"))
        .filter(|k| !k.is_empty())
        .unwrap_or(key)
        .to_string()
}

/// Converts a serde_json::Value to our Value enum.
fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Value::Int(small),
                    Err(_) => Value::Long(i),
                }
            } else if let Ok(d) = n.to_string().parse::<Decimal>() {
                Value::Decimal(d)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => {
            if let Ok(uuid) = Uuid::parse_str(&s) {
                Value::Guid(uuid)
            } else if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                Value::DateTime(dt.with_timezone(&chrono::Utc))
            } else {
                Value::String(s)
            }
        }
        other => Value::Json(other),
    }
}
