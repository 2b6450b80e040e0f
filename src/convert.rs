//! The conversion pipeline
//!
//! load → infer → prepare container → open store → create tables → insert.
//! Phases run strictly one after another on a single store connection, and
//! the first failure ends the run.

use crate::error::{ConvertError, Result};
use crate::melt::extractor::load_records;
use crate::melt::types::{ConvertConfig, Record, RecordSets};
use crate::normalize::normalize_records;
use crate::schema::{infer_schema, Schema};
use crate::store::{prepare_container, StoreWriter};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// A table about to be written: its name, schema and source records
#[derive(Debug, Clone, Serialize)]
pub struct TablePlan {
    pub table: String,
    pub schema: Schema,
    #[serde(skip)]
    pub records: Vec<Record>,
}

/// Inferred layout of both output tables
#[derive(Debug, Clone, Serialize)]
pub struct ConversionPlan {
    pub parent: TablePlan,
    pub child: TablePlan,
}

impl ConversionPlan {
    pub fn tables(&self) -> [&TablePlan; 2] {
        [&self.parent, &self.child]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    pub columns: usize,
    pub rows: u64,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub tables: Vec<TableReport>,
}

pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Converter { config }
    }

    /// Load the input and infer both schemas without touching any store
    pub fn plan(&self) -> Result<ConversionPlan> {
        let RecordSets { parents, children } = load_records(&self.config)?;
        info!(
            "Loaded {} {} and {} {} records from {}",
            parents.len(),
            self.config.parent_table,
            children.len(),
            self.config.child_table,
            self.config.input.display()
        );

        Ok(ConversionPlan {
            parent: self.table_plan(&self.config.parent_table, parents),
            child: self.table_plan(&self.config.child_table, children),
        })
    }

    fn table_plan(&self, table: &str, records: Vec<Record>) -> TablePlan {
        TablePlan {
            table: table.to_string(),
            schema: infer_schema(&records, &self.config.metadata_key),
            records,
        }
    }

    /// Run the whole conversion
    ///
    /// `open_store` is called once the output file has been seeded from the
    /// template, and its store receives every DDL and DML statement.
    pub fn run<S, F>(&self, open_store: F) -> Result<ConversionReport>
    where
        S: StoreWriter,
        F: FnOnce(&ConvertConfig) -> Result<S>,
    {
        let plan = self.plan()?;

        for table in plan.tables() {
            if table.schema.is_empty() {
                return Err(ConvertError::EmptySchema {
                    table: table.table.clone(),
                });
            }
        }

        prepare_container(self.config.template.as_deref(), &self.config.output)?;
        let mut store = open_store(&self.config)?;

        for table in plan.tables() {
            info!("Creating '{}' table...", table.table);
            store.create_table(&table.table, &table.schema)?;
        }

        let mut tables = Vec::new();
        for table in plan.tables() {
            let rows = normalize_records(&table.schema, &table.records);
            let written = store.insert_rows(&table.table, &table.schema, &rows)?;
            info!("Inserted {} rows into '{}'", written, table.table);

            tables.push(TableReport {
                table: table.table.clone(),
                columns: table.schema.len(),
                rows: written,
            });
        }

        info!("Conversion complete: {}", self.config.output.display());
        Ok(ConversionReport {
            output: self.config.output.clone(),
            tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;
    use crate::normalize::Row;
    use crate::store::MemoryStore;
    use crate::value::Cell;
    use std::path::Path;
    use tempfile::TempDir;

    /// Store whose driver rejects every `CREATE TABLE`
    #[derive(Default)]
    struct RejectingStore {
        create_calls: Vec<String>,
        insert_calls: Vec<String>,
    }

    impl StoreWriter for RejectingStore {
        fn create_table(&mut self, table: &str, _schema: &Schema) -> Result<()> {
            self.create_calls.push(table.to_string());
            Err(ConvertError::store_operation(table, "Syntax error in field definition"))
        }

        fn insert_rows(&mut self, table: &str, _schema: &Schema, rows: &[Row]) -> Result<u64> {
            self.insert_calls.push(table.to_string());
            Ok(rows.len() as u64)
        }
    }

    struct Fixture {
        _dir: TempDir,
        config: ConvertConfig,
    }

    fn fixture(json: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Organizations.json");
        let template = dir.path().join("blank.mdb");
        std::fs::write(&input, json).unwrap();
        std::fs::write(&template, b"blank").unwrap();

        let config = ConvertConfig::new(input, dir.path().join("out.mdb")).with_template(template);
        Fixture { _dir: dir, config }
    }

    fn column_types(schema: &Schema) -> Vec<(&str, ColumnType)> {
        schema
            .columns()
            .iter()
            .map(|c| (c.name.as_str(), c.column_type))
            .collect()
    }

    #[test]
    fn test_end_to_end() {
        let fx = fixture(
            r#"{"d":{"results":[{"Id":1,"Name":"Acme","Communications":{"results":[{"OrgId":1,"Type":"email"}]}}]}}"#,
        );

        let mut store = MemoryStore::new();
        let writer = &mut store;
        let report = Converter::new(fx.config.clone())
            .run(move |_| Ok(writer))
            .unwrap();

        let orgs = store.table("Organizations").unwrap();
        assert_eq!(
            column_types(&orgs.schema),
            vec![("Id", ColumnType::Integer), ("Name", ColumnType::Text)]
        );
        assert_eq!(
            orgs.rows,
            vec![vec![Cell::Integer(1), Cell::Text("Acme".to_string())]]
        );

        let comms = store.table("Communications").unwrap();
        assert_eq!(
            column_types(&comms.schema),
            vec![("OrgId", ColumnType::Integer), ("Type", ColumnType::Text)]
        );
        assert_eq!(
            comms.rows,
            vec![vec![Cell::Integer(1), Cell::Text("email".to_string())]]
        );

        assert_eq!(store.tables().len(), 2);
        assert_eq!(report.output, fx.config.output);
        assert_eq!(
            report.tables,
            vec![
                TableReport { table: "Organizations".to_string(), columns: 2, rows: 1 },
                TableReport { table: "Communications".to_string(), columns: 2, rows: 1 },
            ]
        );
        assert!(fx.config.output.exists());
    }

    #[test]
    fn test_empty_results_writes_nothing() {
        let fx = fixture(r#"{"d":{"results":[]}}"#);

        let mut store = MemoryStore::new();
        let writer = &mut store;
        let result = Converter::new(fx.config.clone()).run(move |_| Ok(writer));

        assert!(matches!(result, Err(ConvertError::MissingData(_))));
        assert!(store.tables().is_empty());
        assert!(!fx.config.output.exists());
    }

    #[test]
    fn test_missing_parent_field_is_null() {
        let fx = fixture(
            r#"{"d":{"results":[
                {"__metadata":{"type":"Org"},"Id":1,"Name":"Acme","District":"North",
                 "Communications":{"results":[{"OrgId":1,"Type":"email"}]}},
                {"Id":2,"Name":"Globex",
                 "Communications":{"results":[{"OrgId":2,"Type":"phone","Official":true}]}}
            ]}}"#,
        );

        let mut store = MemoryStore::new();
        let writer = &mut store;
        Converter::new(fx.config.clone())
            .run(move |_| Ok(writer))
            .unwrap();

        let orgs = store.table("Organizations").unwrap();
        let names: Vec<&str> = orgs.schema.column_names().collect();
        assert_eq!(names, vec!["Id", "Name", "District"]);
        assert_eq!(orgs.rows[1][2], Cell::Null);

        let comms = store.table("Communications").unwrap();
        assert_eq!(comms.schema.get("Official"), Some(ColumnType::Boolean));
        assert_eq!(comms.rows[0][2], Cell::Null);
        assert_eq!(comms.rows[1][2], Cell::Boolean(true));
    }

    #[test]
    fn test_no_children_is_empty_schema() {
        let fx = fixture(r#"{"d":{"results":[{"Id":1}]}}"#);

        let mut store = MemoryStore::new();
        let writer = &mut store;
        let result = Converter::new(fx.config.clone()).run(move |_| Ok(writer));

        match result {
            Err(ConvertError::EmptySchema { table }) => assert_eq!(table, "Communications"),
            other => panic!("Expected EmptySchema, got: {:?}", other),
        }
        assert!(store.tables().is_empty());
    }

    #[test]
    fn test_template_required() {
        let mut fx = fixture(
            r#"{"d":{"results":[{"Id":1,"Communications":{"results":[{"OrgId":1}]}}]}}"#,
        );
        fx.config.template = None;

        let mut opened = false;
        let result = Converter::new(fx.config.clone()).run(|_| {
            opened = true;
            Ok(MemoryStore::new())
        });

        assert!(matches!(result, Err(ConvertError::TemplateRequired)));
        assert!(!opened);
    }

    #[test]
    fn test_store_connection_failure_propagates() {
        let fx = fixture(
            r#"{"d":{"results":[{"Id":1,"Communications":{"results":[{"OrgId":1}]}}]}}"#,
        );

        let result = Converter::new(fx.config.clone()).run(|config| -> Result<MemoryStore> {
            Err(ConvertError::store_connection(
                config.output.display().to_string(),
                "driver not installed",
            ))
        });

        assert!(matches!(result, Err(ConvertError::StoreConnection { .. })));
    }

    #[test]
    fn test_create_table_failure_stops_before_inserts() {
        let fx = fixture(
            r#"{"d":{"results":[{"Id":1,"Communications":{"results":[{"OrgId":1}]}}]}}"#,
        );

        let mut store = RejectingStore::default();
        let writer = &mut store;
        let result = Converter::new(fx.config.clone()).run(move |_| Ok(writer));

        match result {
            Err(ConvertError::StoreOperation { table, message }) => {
                assert_eq!(table, "Organizations");
                assert!(message.contains("field definition"));
            }
            other => panic!("Expected StoreOperation, got: {:?}", other),
        }
        assert_eq!(store.create_calls, vec!["Organizations".to_string()]);
        assert!(store.insert_calls.is_empty());
    }

    #[test]
    fn test_missing_input() {
        let config = ConvertConfig::new(Path::new("/nonexistent/orgs.json"), "out.mdb")
            .with_template("blank.mdb");

        assert!(matches!(
            Converter::new(config).plan(),
            Err(ConvertError::NotFound { .. })
        ));
    }

    #[test]
    fn test_plan_serializes_schemas() {
        let fx = fixture(
            r#"{"d":{"results":[{"Id":1,"Communications":{"results":[{"OrgId":1,"When":"2024-01-15T10:30:00Z"}]}}]}}"#,
        );

        let plan = Converter::new(fx.config.clone()).plan().unwrap();
        let value = serde_json::to_value(&plan).unwrap();

        assert_eq!(value["parent"]["table"], "Organizations");
        assert_eq!(value["child"]["schema"][1]["type"], "timestamp");
        assert!(value["child"].get("records").is_none());
    }
}
