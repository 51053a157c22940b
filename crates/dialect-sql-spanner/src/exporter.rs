//! Table DDL for Spanner.

use dialect_sql_core::schema::{
    create_table_strings, drop_table_strings, index_names, Column, PrimaryKey, Table,
    TableExporter,
};
use dialect_sql_core::{Dialect, Result, SqlTypeCode};

/// Name of the key column added to tables declared without a primary key.
pub const ROW_ID_COLUMN: &str = "rowid";

/// Every Spanner table needs a primary key, and indexes must be dropped
/// before their table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpannerTableExporter;

/// The hidden identity column used as the key of tables without one.
#[must_use]
pub fn row_id_column() -> Column {
    let mut column = Column::new(ROW_ID_COLUMN, SqlTypeCode::BigInt)
        .not_null()
        .identity()
        .options("hidden");
    column.sql_type = Some("bigint".to_string());
    column
}

/// Gives `table` a hidden `rowid` primary key when it has none.
///
/// Returns whether a column was added.
pub fn ensure_primary_key(table: &mut Table) -> bool {
    if table.has_primary_key() {
        return false;
    }
    table.columns.push(row_id_column());
    table.primary_key = Some(PrimaryKey {
        name: None,
        columns: vec![ROW_ID_COLUMN.to_string()],
    });
    tracing::debug!(table = %table.name, "Added hidden primary key column");
    true
}

impl TableExporter for SpannerTableExporter {
    fn sql_create_strings(&self, table: &Table, dialect: &dyn Dialect) -> Result<Vec<String>> {
        if table.has_primary_key() {
            return create_table_strings(table, dialect);
        }
        let mut keyed = table.clone();
        ensure_primary_key(&mut keyed);
        create_table_strings(&keyed, dialect)
    }

    fn sql_drop_strings(&self, table: &Table, dialect: &dyn Dialect) -> Result<Vec<String>> {
        let mut statements: Vec<String> = index_names(table)
            .into_iter()
            .map(|name| format!("drop index if exists {name}"))
            .collect();
        statements.extend(drop_table_strings(table, dialect));
        Ok(statements)
    }
}
