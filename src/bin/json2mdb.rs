//! json2mdb: Convert a JSON export into an Access database
//!
//! Usage:
//!   json2mdb Organizations.json Organizations.mdb --template blank.mdb
//!
//!   # Different nested field and table names
//!   json2mdb contacts.json contacts.accdb --template blank.accdb \
//!       --children-field Phones --parent-table People --child-table Phones
//!
//! Writing a real database needs the `odbc` feature and the Microsoft Access
//! ODBC driver.

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use json2mdb::logging::init_tracing;
use json2mdb::{ConversionReport, ConvertConfig, Converter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "json2mdb")]
#[command(about = "Convert a nested JSON export into an Access database", long_about = None)]
struct Args {
    /// Source JSON document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination .mdb/.accdb file (replaced if it exists)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Empty database copied to OUTPUT before writing
    #[arg(long, short = 't')]
    template: Option<PathBuf>,

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

    /// ODBC driver name
    #[arg(long, default_value = "Microsoft Access Driver (*.mdb, *.accdb)")]
    driver: String,
}

impl From<Args> for ConvertConfig {
    fn from(args: Args) -> Self {
        ConvertConfig {
            input: args.input,
            output: args.output,
            template: args.template,
            children_field: args.children_field,
            metadata_key: args.metadata_key,
            parent_table: args.parent_table,
            child_table: args.child_table,
            driver: args.driver,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let converter = Converter::new(Args::parse().into());

    match run(&converter) {
        Ok(report) => {
            println!("✅ Conversion complete: {}", report.output.display());
            for table in &report.tables {
                println!(
                    "  • {:<16} {} columns, {} rows",
                    table.table, table.columns, table.rows
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "odbc")]
fn run(converter: &Converter) -> Result<ConversionReport> {
    use anyhow::Context;
    use json2mdb::store::AccessStore;
    use odbc_api::Environment;

    let env = Environment::new().context("Failed to create ODBC environment")?;
    let report = converter.run(|config| AccessStore::connect(&env, &config.output, &config.driver))?;
    Ok(report)
}

#[cfg(not(feature = "odbc"))]
fn run(converter: &Converter) -> Result<ConversionReport> {
    // Fail before touching the output file
    let plan = converter.plan()?;
    anyhow::bail!(
        "no database driver compiled in (rebuild with `--features odbc`); \
         inferred {} columns for {} and {} for {} - try json2mdb-infer to inspect them",
        plan.parent.schema.len(),
        plan.parent.table,
        plan.child.schema.len(),
        plan.child.table
    )
}
