use crate::error::{ConvertError, Result};
use crate::melt::types::{ConvertConfig, Record, RecordSets};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the JSON document at `path`
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConvertError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::Io(e),
    })?;

    parse_document(&content).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a whole document, SIMD first with serde_json as the fallback
///
/// simd-json rewrites its input buffer, so it gets a scratch copy and the
/// fallback sees the original bytes.
pub fn parse_document(content: &[u8]) -> std::result::Result<Value, serde_json::Error> {
    let mut scratch = content.to_vec();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("SIMD parse failed ({}), retrying with serde_json", e);
            serde_json::from_slice(content)
        }
    }
}

/// Find the record list: `d.results`, or a bare top-level `results`
pub fn locate_results(document: &Value) -> Result<&[Value]> {
    let results = match document.get("d") {
        Some(envelope) => envelope.get("results"),
        None => document.get("results"),
    };

    match results {
        Some(Value::Array(records)) if !records.is_empty() => Ok(records.as_slice()),
        Some(Value::Array(_)) => Err(ConvertError::MissingData(
            "'results' array is empty".to_string(),
        )),
        Some(_) => Err(ConvertError::MissingData(
            "'results' is not an array".to_string(),
        )),
        None => Err(ConvertError::MissingData(
            "no 'results' found in JSON".to_string(),
        )),
    }
}

/// Split top-level records into parent projections and child records
pub fn split_records(records: &[Value], config: &ConvertConfig) -> RecordSets {
    let mut sets = RecordSets::default();

    for (idx, record) in records.iter().enumerate() {
        let Value::Object(obj) = record else {
            warn!("Skipping record {}: not a JSON object", idx);
            continue;
        };

        let parent: Record = obj
            .iter()
            .filter(|(key, _)| **key != config.children_field)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        sets.parents.push(parent);

        let nested = obj
            .get(&config.children_field)
            .and_then(|field| field.get("results"))
            .and_then(Value::as_array);

        if let Some(children) = nested {
            for child in children {
                match child {
                    Value::Object(child) => sets.children.push(child.clone()),
                    _ => warn!(
                        "Skipping {} entry under record {}: not a JSON object",
                        config.children_field, idx
                    ),
                }
            }
        }
    }

    sets
}

/// Load `config.input` and split it into parent and child record sets
pub fn load_records(config: &ConvertConfig) -> Result<RecordSets> {
    let document = load_document(&config.input)?;
    let records = locate_results(&document)?;
    let sets = split_records(records, config);

    debug!(
        "Loaded {} parent and {} child records from {}",
        sets.parents.len(),
        sets.children.len(),
        config.input.display()
    );

    Ok(sets)
}
