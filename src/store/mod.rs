//! Destination store
//!
//! The converter only talks to a [`StoreWriter`]. `MemoryStore` keeps
//! everything in process; `AccessStore` (feature `odbc`) writes an Access
//! database through the Microsoft Access ODBC driver.

pub mod container;
pub mod memory;
#[cfg(feature = "odbc")]
pub mod odbc;
pub mod sql;

pub use container::prepare_container;
pub use memory::{MemoryStore, MemoryTable};
#[cfg(feature = "odbc")]
pub use odbc::AccessStore;

use crate::error::Result;
use crate::normalize::Row;
use crate::schema::Schema;

/// DDL and DML sink for one conversion run
pub trait StoreWriter {
    /// Create `table` with one column per schema entry
    fn create_table(&mut self, table: &str, schema: &Schema) -> Result<()>;

    /// Insert `rows` into `table`, returning the number of rows written
    ///
    /// Every row is aligned with `schema`. Implementations use a single
    /// statement shape for the whole call and stop at the first failure.
    fn insert_rows(&mut self, table: &str, schema: &Schema, rows: &[Row]) -> Result<u64>;
}

impl<S: StoreWriter + ?Sized> StoreWriter for &mut S {
    fn create_table(&mut self, table: &str, schema: &Schema) -> Result<()> {
        (**self).create_table(table, schema)
    }

    fn insert_rows(&mut self, table: &str, schema: &Schema, rows: &[Row]) -> Result<u64> {
        (**self).insert_rows(table, schema, rows)
    }
}
