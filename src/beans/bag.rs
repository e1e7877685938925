//! A dynamically declared bean

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::Bean;
use crate::error::{BeanError, BeanResult};

/// Declared type of a [`PropertyBag`] property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Text; scalars are rendered to text
    String,
    /// Signed 64-bit integer; numeric strings are parsed
    Integer,
    /// Floating point; numeric strings are parsed
    Number,
    /// `true`/`false`, also from the strings `"true"`/`"false"`
    Boolean,
    /// Any JSON value
    Json,
}

impl PropertyType {
    /// Convert `value` to this type, `None` when it cannot be converted
    pub fn coerce(self, value: &Value) -> Option<Value> {
        if value.is_null() {
            return Some(Value::Null);
        }

        match (self, value) {
            (PropertyType::Json, v) => Some(v.clone()),
            (PropertyType::String, Value::String(_)) => Some(value.clone()),
            (PropertyType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
            (PropertyType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
            (PropertyType::Integer, Value::Number(n)) => n.as_i64().map(Value::from),
            (PropertyType::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),
            (PropertyType::Number, Value::Number(n)) => n.as_f64().map(Value::from),
            (PropertyType::Number, Value::String(s)) => s.trim().parse::<f64>().ok().map(Value::from),
            (PropertyType::Boolean, Value::Bool(_)) => Some(value.clone()),
            (PropertyType::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Property {
    kind: PropertyType,
    read_only: bool,
    value: Value,
}

/// Bean whose properties are declared at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyBag {
    type_name: String,
    properties: BTreeMap<String, Property>,
}

impl PropertyBag {
    /// Create a bag with no properties
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Declare a writable property
    pub fn with_property(mut self, name: impl Into<String>, kind: PropertyType) -> Self {
        self.declare(name, kind, false);
        self
    }

    /// Declare a read-only property holding `value`
    pub fn with_read_only(mut self, name: impl Into<String>, kind: PropertyType, value: Value) -> Self {
        let name = name.into();
        self.declare(name.clone(), kind, true);
        if let Some(property) = self.properties.get_mut(&name) {
            property.value = value;
        }
        self
    }

    fn declare(&mut self, name: impl Into<String>, kind: PropertyType, read_only: bool) {
        self.properties.insert(
            name.into(),
            Property {
                kind,
                read_only,
                value: Value::Null,
            },
        );
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).map(|property| &property.value)
    }
}

impl Bean for PropertyBag {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn is_writable(&self, property: &str) -> bool {
        self.properties
            .get(property)
            .is_some_and(|property| !property.read_only)
    }

    fn property_type(&self, property: &str) -> Option<String> {
        self.properties
            .get(property)
            .map(|property| property.kind.to_string())
    }

    fn set_property(&mut self, property: &str, value: Value) -> BeanResult<()> {
        let type_name = self.type_name.clone();
        let slot = self
            .properties
            .get_mut(property)
            .filter(|slot| !slot.read_only)
            .ok_or_else(|| BeanError::NotWritable {
                bean: type_name,
                property: property.to_string(),
            })?;

        slot.value = slot.kind.coerce(&value).ok_or_else(|| BeanError::TypeMismatch {
            property: property.to_string(),
            expected: slot.kind.to_string(),
            value: value.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> PropertyBag {
        PropertyBag::new("FilterSettings")
            .with_property("name", PropertyType::String)
            .with_property("limit", PropertyType::Integer)
            .with_property("ratio", PropertyType::Number)
            .with_property("cached", PropertyType::Boolean)
            .with_read_only("id", PropertyType::String, json!("f-1"))
    }

    #[test]
    fn test_coercions() {
        let mut bag = settings();
        bag.set_property("name", json!(12)).unwrap();
        bag.set_property("limit", json!(" 25 ")).unwrap();
        bag.set_property("ratio", json!("0.5")).unwrap();
        bag.set_property("cached", json!("TRUE")).unwrap();

        assert_eq!(bag.get("name"), Some(&json!("12")));
        assert_eq!(bag.get("limit"), Some(&json!(25)));
        assert_eq!(bag.get("ratio"), Some(&json!(0.5)));
        assert_eq!(bag.get("cached"), Some(&json!(true)));
    }

    #[test]
    fn test_type_mismatch() {
        let mut bag = settings();
        let err = bag.set_property("limit", json!("many")).unwrap_err();

        assert!(matches!(err, BeanError::TypeMismatch { ref expected, .. } if expected == "integer"));
        assert_eq!(bag.get("limit"), Some(&Value::Null));
    }

    #[test]
    fn test_read_only_and_unknown() {
        let mut bag = settings();

        assert!(!bag.is_writable("id"));
        assert!(!bag.is_writable("missing"));
        assert_eq!(bag.property_type("id").as_deref(), Some("string"));
        assert!(matches!(
            bag.set_property("id", json!("f-2")),
            Err(BeanError::NotWritable { .. })
        ));
        assert_eq!(bag.get("id"), Some(&json!("f-1")));
    }
}
