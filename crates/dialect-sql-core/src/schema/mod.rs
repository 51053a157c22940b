//! Relational metadata model and DDL export.

mod exporter;

pub use exporter::{
    column_definition, create_table_strings, drop_table_strings, index_names,
    StandardTableExporter, TableExporter, UniqueDelegate,
};

use crate::types::{Size, SqlTypeCode};

/// Read-only view of a mapped column: how many physical columns it spans,
/// their names, its type and nullability.
pub trait ColumnDescriptor {
    /// Number of physical columns.
    fn column_span(&self) -> usize;

    /// Names of the physical columns.
    fn selectables(&self) -> Vec<&str>;

    /// Type code of the (first) physical column.
    fn type_code(&self) -> SqlTypeCode;

    /// Whether nulls are allowed.
    fn is_nullable(&self) -> bool;
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Type code.
    pub type_code: SqlTypeCode,
    /// Length, precision and scale.
    pub size: Size,
    /// Explicit DDL type, overriding the dialect's type for `type_code`.
    pub sql_type: Option<String>,
    /// Whether the column accepts nulls.
    pub nullable: bool,
    /// Whether the column alone is unique.
    pub unique: bool,
    /// Name of the unique constraint or index of a unique column.
    pub unique_key_name: Option<String>,
    /// Whether values are generated by an identity.
    pub identity: bool,
    /// Default value expression.
    pub default: Option<String>,
    /// Column check constraint.
    pub check: Option<String>,
    /// Trailing column options, e.g. `hidden`.
    pub options: Option<String>,
}

impl Column {
    /// A nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, type_code: SqlTypeCode) -> Self {
        Self {
            name: name.into(),
            type_code,
            size: Size::default(),
            sql_type: None,
            nullable: true,
            unique: false,
            unique_key_name: None,
            identity: false,
            default: None,
            check: None,
            options: None,
        }
    }

    /// Marks the column as not null.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the size.
    #[must_use]
    pub const fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Marks the column as unique, optionally naming the constraint.
    #[must_use]
    pub fn unique(mut self, name: Option<&str>) -> Self {
        self.unique = true;
        self.unique_key_name = name.map(ToString::to_string);
        self
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Sets the default value expression.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the column check constraint.
    #[must_use]
    pub fn check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    /// Sets trailing column options.
    #[must_use]
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

impl ColumnDescriptor for Column {
    fn column_span(&self) -> usize {
        1
    }

    fn selectables(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn type_code(&self) -> SqlTypeCode {
        self.type_code
    }

    fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// A primary key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrimaryKey {
    /// Constraint name, if any.
    pub name: Option<String>,
    /// Key columns, in order.
    pub columns: Vec<String>,
}

/// A non-unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
}

/// A multi-column unique key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    /// Constraint or index name.
    pub name: String,
    /// Key columns, in order.
    pub columns: Vec<String>,
}

/// A foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns; empty means the referenced primary key.
    pub referenced_columns: Vec<String>,
}

/// A table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Schema, if any.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Columns, in order.
    pub columns: Vec<Column>,
    /// Primary key, if any.
    pub primary_key: Option<PrimaryKey>,
    /// Non-unique indexes.
    pub indexes: Vec<Index>,
    /// Multi-column unique keys.
    pub unique_keys: Vec<UniqueKey>,
    /// Foreign keys.
    pub foreign_keys: Vec<ForeignKey>,
    /// Table check constraints.
    pub checks: Vec<String>,
}

impl Table {
    /// An empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key columns.
    #[must_use]
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = Some(PrimaryKey {
            name: None,
            columns: columns.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn index(mut self, name: &str, columns: &[&str]) -> Self {
        self.indexes.push(Index {
            name: name.to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Adds a unique key.
    #[must_use]
    pub fn unique_key(mut self, name: &str, columns: &[&str]) -> Self {
        self.unique_keys.push(UniqueKey {
            name: name.to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Adds a table check constraint.
    #[must_use]
    pub fn check(mut self, check: impl Into<String>) -> Self {
        self.checks.push(check.into());
        self
    }

    /// The possibly schema-qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether the table has a primary key with at least one column.
    #[must_use]
    pub fn has_primary_key(&self) -> bool {
        self.primary_key
            .as_ref()
            .is_some_and(|pk| !pk.columns.is_empty())
    }

    /// Name of the unique constraint of a unique column.
    #[must_use]
    pub fn unique_column_key_name(&self, column: &Column) -> String {
        column
            .unique_key_name
            .clone()
            .unwrap_or_else(|| format!("uk_{}_{}", self.name, column.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder() {
        let table = Table::new("users")
            .column(Column::new("id", SqlTypeCode::BigInt).not_null())
            .column(Column::new("email", SqlTypeCode::Varchar).unique(None))
            .primary_key(&["id"]);
        assert!(table.has_primary_key());
        assert_eq!(table.qualified_name(), "users");
        let email = table.find_column("email").unwrap();
        assert_eq!(table.unique_column_key_name(email), "uk_users_email");
        assert!(!table.find_column("id").unwrap().is_nullable());
    }

    #[test]
    fn test_column_descriptor() {
        let column = Column::new("name", SqlTypeCode::Varchar);
        assert_eq!(column.column_span(), 1);
        assert_eq!(column.selectables(), vec!["name"]);
        assert_eq!(column.type_code(), SqlTypeCode::Varchar);
        assert!(column.is_nullable());
    }

    #[test]
    fn test_empty_primary_key_is_no_primary_key() {
        let mut table = Table::new("t").column(Column::new("a", SqlTypeCode::Integer));
        table.primary_key = Some(PrimaryKey::default());
        assert!(!table.has_primary_key());
    }
}
