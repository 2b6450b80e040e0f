//! JSON melting - split a nested document into parent and child records
//!
//! The source document holds a list of parent records, each of which may
//! carry one nested `{ "results": [...] }` field. Melting removes that field
//! from the parent and collects its elements, unmodified, as child records.

pub mod extractor;
pub mod types;

pub use extractor::{load_document, load_records, locate_results, parse_document, split_records};
pub use types::{ConvertConfig, Record, RecordSets};
