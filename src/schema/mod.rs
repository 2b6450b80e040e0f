//! Schema inference
//!
//! Derives an ordered, typed column list from a set of flat JSON records,
//! with ISO-8601 detection for date/time text.

pub mod format;
pub mod inference;

pub use inference::{infer_schema, Column, ColumnType, Schema, SchemaInferrer, TEXT_MAX_LENGTH};
