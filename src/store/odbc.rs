//! Access database output through ODBC.
//!
//! **Requirements:**
//! - The `odbc` feature must be enabled
//! - The Microsoft Access Database Engine (ACE) ODBC driver must be installed.
//!   It ships with Office or as the "Microsoft Access Database Engine
//!   Redistributable"; its bitness must match the binary's.

use crate::error::{ConvertError, Result};
use crate::normalize::Row;
use crate::schema::Schema;
use crate::store::sql::{create_table_sql, insert_sql};
use crate::store::StoreWriter;
use crate::value::Cell;
use odbc_api::parameter::{InputParameter, VarWCharBox};
use odbc_api::{Bit, Connection, ConnectionOptions, Environment};
use std::path::Path;
use tracing::{debug, info};

/// An open Access database file
pub struct AccessStore<'env> {
    conn: Connection<'env>,
}

impl<'env> AccessStore<'env> {
    /// Open the database file at `path` with the named Access driver.
    ///
    /// # Errors
    ///
    /// Returns `StoreConnection` if the driver is missing or the file cannot
    /// be opened.
    pub fn connect(env: &'env Environment, path: &Path, driver: &str) -> Result<Self> {
        let target = path.display().to_string();
        let connection_string = format!("Driver={{{}}};DBQ={};", driver, target);

        debug!("ODBC connection string: {}", connection_string);

        let conn = env
            .connect_with_connection_string(&connection_string, ConnectionOptions::default())
            .map_err(|e| {
                ConvertError::store_connection(
                    &target,
                    format!(
                        "{}. Make sure the '{}' ODBC driver is installed.",
                        e, driver
                    ),
                )
            })?;

        info!("Connected to {} via ODBC", target);
        Ok(AccessStore { conn })
    }
}

/// Parameter kind a cell is sent to the driver as
#[derive(Debug, Clone, PartialEq)]
enum Binding<'a> {
    Null,
    Bit(bool),
    Long(i32),
    Double(f64),
    Text(&'a str),
}

/// Pick a parameter kind the Access driver accepts
///
/// Access INTEGER is 32 bits and the driver has no BIGINT binding, so wider
/// integers travel as doubles.
fn binding(cell: &Cell) -> Binding<'_> {
    match cell {
        Cell::Null => Binding::Null,
        Cell::Boolean(b) => Binding::Bit(*b),
        Cell::Integer(i) => match i32::try_from(*i) {
            Ok(small) => Binding::Long(small),
            Err(_) => Binding::Double(*i as f64),
        },
        Cell::Float(f) => Binding::Double(*f),
        Cell::Text(s) => Binding::Text(s),
    }
}

impl Binding<'_> {
    fn into_parameter(self) -> Box<dyn InputParameter> {
        match self {
            // Untyped nulls go through as a null wide string
            Binding::Null => Box::new(VarWCharBox::null()),
            Binding::Bit(b) => Box::new(Bit::from_bool(b)),
            Binding::Long(i) => Box::new(i),
            Binding::Double(f) => Box::new(f),
            Binding::Text(s) => Box::new(VarWCharBox::from_str_slice(s)),
        }
    }
}

fn bind_cell(cell: &Cell) -> Box<dyn InputParameter> {
    binding(cell).into_parameter()
}

impl StoreWriter for AccessStore<'_> {
    fn create_table(&mut self, table: &str, schema: &Schema) -> Result<()> {
        let sql = create_table_sql(table, schema);
        debug!("{}", sql);

        let mut statement = self.conn.prepare(&sql).map_err(|e| {
            ConvertError::store_operation(table, format!("{} - SQL: {}", e, sql))
        })?;
        statement.execute(()).map_err(|e| {
            ConvertError::store_operation(table, format!("{} - SQL: {}", e, sql))
        })?;
        Ok(())
    }

    fn insert_rows(&mut self, table: &str, schema: &Schema, rows: &[Row]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let sql = insert_sql(table, schema);
        debug!("{}", sql);

        let mut statement = self.conn.prepare(&sql).map_err(|e| {
            ConvertError::store_operation(table, format!("{} - SQL: {}", e, sql))
        })?;

        for (idx, row) in rows.iter().enumerate() {
            let params: Vec<Box<dyn InputParameter>> = row.iter().map(bind_cell).collect();
            statement.execute(params.as_slice()).map_err(|e| {
                ConvertError::store_operation(
                    table,
                    format!("row {}: {} - SQL: {}", idx, e, sql),
                )
            })?;
        }

        debug!("Inserted {} rows into {}", rows.len(), table);
        Ok(rows.len() as u64)
    }
}
