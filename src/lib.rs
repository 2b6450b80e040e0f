//! # json2mdb - JSON to Access conversion
//!
//! Infers a tabular schema from a nested JSON document and writes it into two
//! related tables of an Access database, normalizing JSON values into typed
//! columns.
//!
//! ## Modules
//!
//! - **melt**: split `{"d": {"results": [...]}}` into parent and child records
//! - **schema**: first-value-wins column type inference
//! - **normalize**: project records onto a schema as store-ready rows
//! - **store**: the `StoreWriter` seam, SQL rendering and template handling
//! - **convert**: the end-to-end pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use json2mdb::{infer_schema, normalize_record, Cell, ColumnType, Record};
//! use serde_json::json;
//!
//! let records: Vec<Record> = vec![
//!     serde_json::from_value(json!({"Id": 1, "Name": "Acme"})).unwrap(),
//!     serde_json::from_value(json!({"Id": "two", "Tags": ["a"]})).unwrap(),
//! ];
//!
//! let schema = infer_schema(&records, "__metadata");
//! assert_eq!(schema.get("Id"), Some(ColumnType::Integer));
//!
//! // No coercion: the second Id stays text, arrays become JSON text
//! let row = normalize_record(&schema, &records[1]);
//! assert_eq!(row[0], Cell::Text("two".to_string()));
//! assert_eq!(row[1], Cell::Null);
//! assert_eq!(row[2], Cell::Text(r#"["a"]"#.to_string()));
//! ```

pub mod convert;
pub mod error;
pub mod logging;
pub mod melt;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod value;

// Re-export commonly used types for convenience
pub use convert::{ConversionPlan, ConversionReport, Converter, TablePlan, TableReport};
pub use error::{ConvertError, Result};
pub use melt::{ConvertConfig, Record, RecordSets};
pub use normalize::{normalize_record, normalize_records, Row};
pub use schema::{infer_schema, Column, ColumnType, Schema};
pub use store::{MemoryStore, StoreWriter};
pub use value::{Cell, FieldValue};
