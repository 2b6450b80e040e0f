//! Error types for the conversion library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for conversion runs.
///
/// Every variant is fatal: a run that hits one of these stops where it is
/// and leaves whatever it already wrote in place.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input or template file does not exist
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Input is not well-formed JSON
    #[error("Invalid JSON format in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No records at the expected path
    #[error("No records found: {0}")]
    MissingData(String),

    /// The output container can only be seeded from a template
    #[error("Template path not provided - cannot create the output file")]
    TemplateRequired,

    /// A record set produced no columns, so its table cannot be declared
    #[error("Table {table} has no columns to create")]
    EmptySchema { table: String },

    /// Store could not be reached or opened
    #[error("Failed to connect to store {target}: {message}")]
    StoreConnection { target: String, message: String },

    /// Store rejected a DDL or DML statement
    #[error("Store operation failed for table {table}: {message}")]
    StoreOperation { table: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn store_connection(target: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::StoreConnection {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn store_operation(table: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::StoreOperation {
            table: table.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
