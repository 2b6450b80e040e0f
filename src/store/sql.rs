//! Statement rendering for the Access SQL dialect

use crate::schema::{ColumnType, Schema, TEXT_MAX_LENGTH};

/// Bracket-quote an identifier, doubling any embedded `]`
///
/// Brackets make reserved words and spaces safe. Jet/ACE has no escape for
/// `]` inside a bracketed name and rejects `.`, `!`, `` ` `` and `[` in
/// object names outright, so such field names fail at `CREATE TABLE` and
/// surface as `StoreOperation`. The `]` doubling only keeps the statement
/// well-formed enough for the driver to report that.
pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Access type name for a column type
pub fn access_type(column_type: ColumnType) -> String {
    match column_type {
        ColumnType::Boolean => "YESNO".to_string(),
        ColumnType::Integer => "INTEGER".to_string(),
        ColumnType::Float => "DOUBLE".to_string(),
        ColumnType::Timestamp => "DATETIME".to_string(),
        ColumnType::Text => format!("TEXT({})", TEXT_MAX_LENGTH),
    }
}

pub fn create_table_sql(table: &str, schema: &Schema) -> String {
    let columns: Vec<String> = schema
        .columns()
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), access_type(c.column_type)))
        .collect();

    format!("CREATE TABLE {} ({});", quote_ident(table), columns.join(", "))
}

/// Parameterized insert shared by every row of `table`
pub fn insert_sql(table: &str, schema: &Schema) -> String {
    let columns: Vec<String> = schema.column_names().map(quote_ident).collect();
    let placeholders = vec!["?"; schema.len()].join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quote_ident(table),
        columns.join(", "),
        placeholders
    )
}
