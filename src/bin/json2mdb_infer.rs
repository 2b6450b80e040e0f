//! json2mdb-infer: Show the tables a conversion would create
//!
//! Loads the document and infers both schemas without opening any database.
//!
//! Usage:
//!   # Schemas as JSON
//!   json2mdb-infer Organizations.json
//!
//!   # The CREATE TABLE statements that would be sent to Access
//!   json2mdb-infer Organizations.json --ddl

use anyhow::Result;
use clap::Parser;
use json2mdb::logging::init_tracing;
use json2mdb::store::sql::create_table_sql;
use json2mdb::{ConvertConfig, Converter};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "json2mdb-infer")]
#[command(about = "Infer the Access tables for a nested JSON export", long_about = None)]
struct Args {
    /// Source JSON document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Print CREATE TABLE statements instead of JSON
    #[arg(long)]
    ddl: bool,

    /// Compact output (no pretty-printing)
    #[arg(long, conflicts_with = "ddl")]
    compact: bool,

    /// Parent field holding the nested child records
    #[arg(long, default_value = "Communications")]
    children_field: String,

    /// Reserved key never turned into a column
    #[arg(long, default_value = "__metadata")]
    metadata_key: String,

    /// Table for parent records
    #[arg(long, default_value = "Organizations")]
    parent_table: String,

    /// Table for child records
    #[arg(long, default_value = "Communications")]
    child_table: String,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = ConvertConfig {
        input: args.input,
        children_field: args.children_field,
        metadata_key: args.metadata_key,
        parent_table: args.parent_table,
        child_table: args.child_table,
        ..Default::default()
    };
    let plan = Converter::new(config).plan()?;

    if args.ddl {
        for table in plan.tables() {
            if table.schema.is_empty() {
                eprintln!("-- {}: no columns inferred", table.table);
            } else {
                println!("{}", create_table_sql(&table.table, &table.schema));
            }
        }
        return Ok(());
    }

    let tables: Vec<_> = plan
        .tables()
        .into_iter()
        .map(|table| {
            json!({
                "name": table.table,
                "records": table.records.len(),
                "columns": table.schema,
            })
        })
        .collect();
    let output = json!({ "tables": tables });

    let output = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };

    println!("{}", output);

    Ok(())
}
