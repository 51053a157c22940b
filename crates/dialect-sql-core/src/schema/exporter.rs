//! CREATE/DROP DDL for tables.

use super::{Column, ColumnDescriptor, Table};
use crate::dialect::{Dialect, Feature};
use crate::error::{DialectError, Result};

/// How unique constraints are exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueDelegate {
    /// `alter table <t> add constraint <uk> unique (...)` after the table,
    /// or inline `unique` on single columns when the backend allows it.
    AlterTableConstraint,
    /// `create unique index <uk> on <t> (...)` after the table, dropped with
    /// `drop index if exists <uk>` before the table.
    CreateUniqueIndex,
}

/// Produces the DDL creating and dropping a table.
///
/// The defaults render standard DDL; see [`create_table_strings`] and
/// [`drop_table_strings`].
pub trait TableExporter: Send + Sync {
    /// Statements creating `table`, its unique constraints and indexes.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Mapping`] when the table cannot be mapped.
    fn sql_create_strings(&self, table: &Table, dialect: &dyn Dialect) -> Result<Vec<String>> {
        create_table_strings(table, dialect)
    }

    /// Statements dropping `table`.
    ///
    /// # Errors
    ///
    /// Returns an error when the table cannot be dropped on the backend.
    fn sql_drop_strings(&self, table: &Table, dialect: &dyn Dialect) -> Result<Vec<String>> {
        Ok(drop_table_strings(table, dialect))
    }

    /// Statements adding the foreign keys of `table`.
    fn sql_foreign_key_strings(&self, table: &Table, dialect: &dyn Dialect) -> Vec<String> {
        let table_name = table.qualified_name();
        table
            .foreign_keys
            .iter()
            .map(|fk| {
                format!(
                    "alter table {table_name}{}",
                    dialect.add_foreign_key_constraint_string(
                        &fk.name,
                        &fk.columns,
                        &fk.referenced_table,
                        &fk.referenced_columns,
                    )
                )
            })
            .collect()
    }

    /// Statements dropping the foreign keys of `table`.
    fn sql_drop_foreign_key_strings(&self, table: &Table, dialect: &dyn Dialect) -> Vec<String> {
        let alter = alter_table(table, dialect);
        let if_exists = if dialect.supports(Feature::IfExistsBeforeConstraintName) {
            "if exists "
        } else {
            ""
        };
        table
            .foreign_keys
            .iter()
            .map(|fk| format!("{alter} drop constraint {if_exists}{}", fk.name))
            .collect()
    }
}

/// The exporter of dialects without DDL overrides.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardTableExporter;

impl TableExporter for StandardTableExporter {}

fn alter_table(table: &Table, dialect: &dyn Dialect) -> String {
    if dialect.supports(Feature::IfExistsAfterAlterTable) {
        format!("alter table if exists {}", table.qualified_name())
    } else {
        format!("alter table {}", table.qualified_name())
    }
}

fn inline_unique(dialect: &dyn Dialect) -> bool {
    dialect.unique_delegate() == UniqueDelegate::AlterTableConstraint
        && dialect.supports(Feature::UniqueConstraintInColumnDefinition)
}

/// Column definition: name, type, default, identity, nullability, inline
/// uniqueness, check and options.
#[must_use]
pub fn column_definition(column: &Column, in_primary_key: bool, dialect: &dyn Dialect) -> String {
    let sql_type = column
        .sql_type
        .clone()
        .unwrap_or_else(|| dialect.ddl_type(column.type_code(), column.size));
    let mut sql = format!("{} {sql_type}", column.name);
    if let Some(default) = &column.default {
        sql.push_str(" default ");
        sql.push_str(default);
    }
    if column.identity {
        sql.push(' ');
        sql.push_str(dialect.identity_column_string());
    }
    if in_primary_key || !column.is_nullable() {
        sql.push_str(" not null");
    }
    if column.unique && !in_primary_key && inline_unique(dialect) {
        sql.push_str(" unique");
    }
    if let Some(check) = &column.check {
        sql.push_str(&format!(" check ({check})"));
    }
    if let Some(options) = &column.options {
        sql.push(' ');
        sql.push_str(options);
    }
    sql
}

fn validate(table: &Table) -> Result<()> {
    if table.columns.is_empty() {
        return Err(DialectError::Mapping(format!(
            "Table [{}] has no columns",
            table.name
        )));
    }
    if let Some(pk) = &table.primary_key {
        for name in &pk.columns {
            if table.find_column(name).is_none() {
                return Err(DialectError::Mapping(format!(
                    "Primary key column [{name}] not found in table [{}]",
                    table.name
                )));
            }
        }
    }
    Ok(())
}

/// `create table` followed by unique constraints and indexes.
///
/// # Errors
///
/// Returns [`DialectError::Mapping`] for tables without columns or with
/// primary key columns that do not exist.
pub fn create_table_strings(table: &Table, dialect: &dyn Dialect) -> Result<Vec<String>> {
    validate(table)?;
    let table_name = table.qualified_name();
    let pk_columns: &[String] = table
        .primary_key
        .as_ref()
        .map(|pk| pk.columns.as_slice())
        .unwrap_or_default();

    let mut parts: Vec<String> = table
        .columns
        .iter()
        .map(|c| column_definition(c, pk_columns.contains(&c.name), dialect))
        .collect();
    if !pk_columns.is_empty() {
        parts.push(format!("primary key ({})", pk_columns.join(", ")));
    }
    for check in &table.checks {
        parts.push(format!("check ({check})"));
    }

    let mut statements = vec![format!("create table {table_name} ({})", parts.join(", "))];
    statements.extend(unique_key_strings(table, pk_columns, dialect));
    for index in &table.indexes {
        statements.push(format!(
            "create index {} on {table_name} ({})",
            index.name,
            index.columns.join(", ")
        ));
    }
    tracing::debug!(
        dialect = dialect.name(),
        table = %table_name,
        statements = statements.len(),
        "Exported table"
    );
    Ok(statements)
}

fn unique_key_strings(table: &Table, pk_columns: &[String], dialect: &dyn Dialect) -> Vec<String> {
    let table_name = table.qualified_name();
    let mut keys: Vec<(String, String)> = table
        .columns
        .iter()
        .filter(|c| c.unique && !pk_columns.contains(&c.name) && !inline_unique(dialect))
        .map(|c| (table.unique_column_key_name(c), c.name.clone()))
        .collect();
    keys.extend(
        table
            .unique_keys
            .iter()
            .map(|uk| (uk.name.clone(), uk.columns.join(", "))),
    );
    match dialect.unique_delegate() {
        UniqueDelegate::AlterTableConstraint => {
            let alter = alter_table(table, dialect);
            keys.into_iter()
                .map(|(name, columns)| format!("{alter} add constraint {name} unique ({columns})"))
                .collect()
        }
        UniqueDelegate::CreateUniqueIndex => keys
            .into_iter()
            .map(|(name, columns)| format!("create unique index {name} on {table_name} ({columns})"))
            .collect(),
    }
}

/// Names of the indexes backing the unique keys, unique columns and plain
/// indexes of `table`.
#[must_use]
pub fn index_names(table: &Table) -> Vec<String> {
    table
        .indexes
        .iter()
        .map(|i| i.name.clone())
        .chain(table.unique_keys.iter().map(|uk| uk.name.clone()))
        .chain(
            table
                .columns
                .iter()
                .filter(|c| c.unique)
                .map(|c| table.unique_column_key_name(c)),
        )
        .collect()
}

/// Optional before-drop statement, then `drop table if exists`.
#[must_use]
pub fn drop_table_strings(table: &Table, dialect: &dyn Dialect) -> Vec<String> {
    let mut statements = Vec::new();
    if let Some(before) = dialect.before_drop_statement() {
        statements.push(before);
    }
    statements.push(format!(
        "drop table if exists {}{}",
        table.qualified_name(),
        dialect.cascade_constraints_string()
    ));
    statements
}
