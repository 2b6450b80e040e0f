//! Schema-aligned row normalization
//!
//! Values are never coerced to their column's type. A text value in an
//! integer column reaches the store as text, and the store's own implicit
//! conversion decides what happens to it.

use crate::melt::types::Record;
use crate::schema::Schema;
use crate::value::Cell;

/// A normalized row, one cell per schema column
pub type Row = Vec<Cell>;

/// Project `record` onto `schema`; absent keys become null
pub fn normalize_record(schema: &Schema, record: &Record) -> Row {
    schema
        .column_names()
        .map(|name| record.get(name).map_or(Cell::Null, Cell::from))
        .collect()
}

pub fn normalize_records(schema: &Schema, records: &[Record]) -> Vec<Row> {
    records
        .iter()
        .map(|record| normalize_record(schema, record))
        .collect()
}
