//! First-value-wins schema inference over flat records
//!
//! Each key's column type comes from the first record that carries it and is
//! never revised. Later records with a different shape for the same key do
//! not widen the column; the store coerces or rejects those values itself.

use crate::melt::types::Record;
use crate::value::FieldValue;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Maximum length of text columns
pub const TEXT_MAX_LENGTH: usize = 255;

/// Column types a store table can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Boolean,
    Integer,
    Float,
    Timestamp,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Ordered column list inferred from one record set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column_type)
    }
}

/// Accumulates columns record by record
#[derive(Debug)]
pub struct SchemaInferrer {
    metadata_key: String,
    seen: HashSet<String>,
    schema: Schema,
}

impl SchemaInferrer {
    pub fn new(metadata_key: impl Into<String>) -> Self {
        SchemaInferrer {
            metadata_key: metadata_key.into(),
            seen: HashSet::new(),
            schema: Schema::new(),
        }
    }

    /// Add any keys of `record` not seen before, in the record's key order
    pub fn add_record(&mut self, record: &Record) {
        for (key, value) in record.iter() {
            if *key == self.metadata_key || self.seen.contains(key) {
                continue;
            }

            self.seen.insert(key.clone());
            self.schema.columns.push(Column {
                name: key.clone(),
                column_type: FieldValue::classify(value).column_type(),
            });
        }
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

/// Infer a schema from a whole record set
pub fn infer_schema(records: &[Record], metadata_key: &str) -> Schema {
    let mut inferrer = SchemaInferrer::new(metadata_key);

    for record in records {
        inferrer.add_record(record);
    }

    inferrer.build()
}
