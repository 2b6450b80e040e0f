//! Tagged value kinds shared by schema inference and normalization
//!
//! A raw JSON value is classified exactly once into a [`FieldValue`].
//! Inference reads its column type, normalization turns it into a [`Cell`].

use crate::schema::format::is_iso_timestamp;
use crate::schema::ColumnType;
use serde::Serialize;
use serde_json::Value;

/// A JSON value sorted into the kinds the store understands
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// Text that parses as an ISO-8601 date/time, kept verbatim
    Timestamp(String),
    Text(String),
    /// Array or object
    Composite(Value),
}

impl FieldValue {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                // u64 beyond i64 range lands here too
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) if is_iso_timestamp(s) => FieldValue::Timestamp(s.clone()),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => FieldValue::Composite(value.clone()),
        }
    }

    /// Column type a first sample of this kind infers
    pub fn column_type(&self) -> ColumnType {
        match self {
            FieldValue::Boolean(_) => ColumnType::Boolean,
            FieldValue::Integer(_) => ColumnType::Integer,
            FieldValue::Float(_) => ColumnType::Float,
            FieldValue::Timestamp(_) => ColumnType::Timestamp,
            FieldValue::Null | FieldValue::Text(_) | FieldValue::Composite(_) => ColumnType::Text,
        }
    }

    /// Store-ready form: scalars pass through, composites become JSON text
    pub fn into_cell(self) -> Cell {
        match self {
            FieldValue::Null => Cell::Null,
            FieldValue::Boolean(b) => Cell::Boolean(b),
            FieldValue::Integer(i) => Cell::Integer(i),
            FieldValue::Float(f) => Cell::Float(f),
            FieldValue::Timestamp(s) | FieldValue::Text(s) => Cell::Text(s),
            // serde_json leaves non-ASCII unescaped and keeps key order
            FieldValue::Composite(v) => Cell::Text(v.to_string()),
        }
    }
}

/// One value of a normalized row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        FieldValue::classify(value).into_cell()
    }
}
