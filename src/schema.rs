//! Typed view of a PocketBase collection schema

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema has no `fields` array")]
    MissingFields,

    #[error("field descriptor {index} is malformed: {reason}")]
    MalformedField { index: usize, reason: String },
}

/// Field types the form renderer knows about. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Email,
    Number,
    Bool,
    Other(String),
}

impl FieldType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "text" => FieldType::Text,
            "email" => FieldType::Email,
            "number" => FieldType::Number,
            "bool" => FieldType::Bool,
            other => FieldType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Bool => "bool",
            FieldType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    pub fields: Vec<FieldDescriptor>,
}

impl CollectionSchema {
    /// Decode the collection object returned by the backend.
    ///
    /// Only `fields[].name` and `fields[].type` are read; every other key is ignored.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, SchemaError> {
        let raw_fields = object
            .get("fields")
            .and_then(Value::as_array)
            .ok_or(SchemaError::MissingFields)?;

        let fields = raw_fields
            .iter()
            .enumerate()
            .map(|(index, raw)| FieldDescriptor::from_value(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }

    /// Names of declared boolean fields, in schema order
    pub fn bool_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.field_type == FieldType::Bool)
            .map(|f| f.name.as_str())
    }
}

impl FieldDescriptor {
    fn from_value(index: usize, raw: &Value) -> Result<Self, SchemaError> {
        let malformed = |reason: &str| SchemaError::MalformedField {
            index,
            reason: reason.to_string(),
        };

        let object = raw.as_object().ok_or_else(|| malformed("not an object"))?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("`name` missing or not a string"))?;
        let field_type = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("`type` missing or not a string"))?;

        Ok(Self {
            name: name.to_string(),
            field_type: FieldType::parse(field_type),
        })
    }
}
