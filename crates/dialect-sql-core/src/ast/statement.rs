//! SQL statement AST types.

use super::expression::Expr;
use crate::lock::{LockMode, LockTimeout};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Ascending order on `expr`.
    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Asc,
        }
    }

    /// Descending order on `expr`.
    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Desc,
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "join",
            Self::Left => "left join",
            Self::Right => "right join",
            Self::Full => "full join",
            Self::Cross => "cross join",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// Whether the joined item is LATERAL.
    pub lateral: bool,
    /// The table to join.
    pub table: TableRef,
    /// The join condition (for non-CROSS joins).
    pub on: Option<Expr>,
}

/// A named table, as used by DML targets and FROM items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTable {
    /// Schema name (optional).
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Alias (identification variable).
    pub alias: Option<String>,
}

impl NamedTable {
    /// Creates a table reference without schema or alias.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a schema qualifier.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Returns the possibly schema-qualified table expression.
    #[must_use]
    pub fn table_expression(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A named table.
    Table(NamedTable),
    /// A subquery.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias (required for subqueries).
        alias: String,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table(NamedTable::new(name))
    }

    /// Creates a table reference with an alias.
    #[must_use]
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Table(NamedTable::new(name).alias(alias))
    }

    /// Joins `table` to this reference.
    #[must_use]
    pub fn join(self, join_type: JoinType, table: Self, on: Option<Expr>) -> Self {
        Self::Join {
            left: Box::new(self),
            join: Box::new(JoinClause {
                join_type,
                lateral: false,
                table,
                on,
            }),
        }
    }

    /// Joins a LATERAL item to this reference.
    #[must_use]
    pub fn join_lateral(self, join_type: JoinType, table: Self, on: Option<Expr>) -> Self {
        Self::Join {
            left: Box::new(self),
            join: Box::new(JoinClause {
                join_type,
                lateral: true,
                table,
                on,
            }),
        }
    }
}

/// Planner materialization hint of a common table expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CteMaterialization {
    /// Compute once and reuse.
    Materialized,
    /// Inline into the referencing query.
    NotMaterialized,
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// CTE name.
    pub name: String,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// The query.
    pub query: Box<SelectStatement>,
    /// Materialization hint.
    pub materialization: Option<CteMaterialization>,
}

impl Cte {
    /// Creates a CTE without column list or hint.
    #[must_use]
    pub fn new(name: impl Into<String>, query: SelectStatement) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            query: Box::new(query),
            materialization: None,
        }
    }

    /// Sets the materialization hint.
    #[must_use]
    pub const fn materialization(mut self, hint: CteMaterialization) -> Self {
        self.materialization = Some(hint);
        self
    }
}

/// A WITH clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithClause {
    /// Whether the CTEs are RECURSIVE.
    pub recursive: bool,
    /// The CTEs, in declaration order.
    pub ctes: Vec<Cte>,
}

/// A pessimistic lock request attached to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockClause {
    /// Read or write lock.
    pub mode: LockMode,
    /// Timeout semantics.
    pub timeout: LockTimeout,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select.
    pub columns: Vec<SelectColumn>,
    /// The FROM clause.
    pub from: Option<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
    /// Lock clause.
    pub lock: Option<LockClause>,
}

impl SelectStatement {
    /// Creates `select <columns> from <from>`.
    #[must_use]
    pub fn new(columns: Vec<SelectColumn>, from: Option<TableRef>) -> Self {
        Self {
            columns,
            from,
            ..Self::default()
        }
    }
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// Target table.
    pub target: NamedTable,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// Values to insert.
    pub values: InsertSource,
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ...
    Query(Box<SelectStatement>),
    /// DEFAULT VALUES
    DefaultValues,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// Target table.
    pub target: NamedTable,
    /// SET assignments.
    pub assignments: Vec<UpdateAssignment>,
    /// Auxiliary FROM items (multi-table update).
    pub from: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

impl UpdateAssignment {
    /// Creates `column = value`.
    #[must_use]
    pub fn new(column: impl Into<String>, value: Expr) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// Target table.
    pub target: NamedTable,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction() {
        assert_eq!(OrderDirection::Asc.as_str(), "asc");
        assert_eq!(OrderDirection::Desc.as_str(), "desc");
    }

    #[test]
    fn test_join_type() {
        assert_eq!(JoinType::Inner.as_str(), "join");
        assert_eq!(JoinType::Left.as_str(), "left join");
    }

    #[test]
    fn test_named_table_expression() {
        let table = NamedTable::new("users").schema("app").alias("u");
        assert_eq!(table.table_expression(), "app.users");
        assert_eq!(table.alias.as_deref(), Some("u"));
    }
}
