use serde_json::{Map, Value};
use std::path::PathBuf;

/// One flat JSON object, keys in document order
pub type Record = Map<String, Value>;

/// Parent and child records split out of a source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSets {
    /// Top-level records with the children field removed
    pub parents: Vec<Record>,

    /// Elements of every parent's nested children array, in document order
    pub children: Vec<Record>,
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Source JSON document
    pub input: PathBuf,

    /// Destination database file
    pub output: PathBuf,

    /// Empty database file copied to `output` before writing
    pub template: Option<PathBuf>,

    /// Parent field holding `{ "results": [...] }` child records
    pub children_field: String,

    /// Reserved key that never becomes a column
    pub metadata_key: String,

    /// Table receiving parent records
    pub parent_table: String,

    /// Table receiving child records
    pub child_table: String,

    /// ODBC driver name used to open the output file
    pub driver: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            input: PathBuf::new(),
            output: PathBuf::new(),
            template: None,
            children_field: String::from("Communications"),
            metadata_key: String::from("__metadata"),
            parent_table: String::from("Organizations"),
            child_table: String::from("Communications"),
            driver: String::from("Microsoft Access Driver (*.mdb, *.accdb)"),
        }
    }
}

impl ConvertConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        ConvertConfig {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }
}
