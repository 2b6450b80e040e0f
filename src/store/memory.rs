use crate::error::{ConvertError, Result};
use crate::normalize::Row;
use crate::schema::Schema;
use crate::store::sql::insert_sql;
use crate::store::StoreWriter;

/// A table held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTable {
    pub name: String,
    pub schema: Schema,
    pub rows: Vec<Row>,
}

/// In-process store that records tables and rows
///
/// Enforces the same shape rules a real database would: table names are
/// unique, inserts need an existing table, and rows must match its width.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Vec<MemoryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[MemoryTable] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl StoreWriter for MemoryStore {
    fn create_table(&mut self, table: &str, schema: &Schema) -> Result<()> {
        if self.table(table).is_some() {
            return Err(ConvertError::store_operation(table, "table already exists"));
        }

        self.tables.push(MemoryTable {
            name: table.to_string(),
            schema: schema.clone(),
            rows: Vec::new(),
        });
        Ok(())
    }

    fn insert_rows(&mut self, table: &str, schema: &Schema, rows: &[Row]) -> Result<u64> {
        let sql = insert_sql(table, schema);
        let target = self
            .tables
            .iter_mut()
            .find(|t| t.name == table)
            .ok_or_else(|| {
                ConvertError::store_operation(table, format!("no such table - SQL: {}", sql))
            })?;

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != target.schema.len() {
                return Err(ConvertError::store_operation(
                    table,
                    format!(
                        "row {} has {} values, table has {} columns - SQL: {}",
                        idx,
                        row.len(),
                        target.schema.len(),
                        sql
                    ),
                ));
            }
            target.rows.push(row.clone());
        }

        Ok(rows.len() as u64)
    }
}
